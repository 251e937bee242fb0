//! Zone stock simulation: randomized perturbation bounded by capacity.
//!
//! Each cycle draws a small signed delta for every unlocked zone, adds it to
//! the zone's stock and clamps the result to `0..=max_capacity`. Locked zones
//! are skipped entirely. The same clamping rule backs manual adjustments
//! through [`YardMap::adjust_stock`], so both paths agree on the bounds.
//!
//! Randomness comes from a caller-supplied [`Rng`] so tests can seed it.
//!
//! [`YardMap::adjust_stock`]: crate::yard_map::YardMap::adjust_stock

use rand::Rng;
use timberyard_types::ZoneId;
use tracing::debug;

use crate::error::WorldError;
use crate::yard_map::YardMap;

/// Default lowest delta drawn per zone per cycle.
pub const DEFAULT_DELTA_MIN: i32 = -2;

/// Default highest delta drawn per zone per cycle.
pub const DEFAULT_DELTA_MAX: i32 = 2;

/// Inclusive range of per-cycle stock deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDelta {
    min: i32,
    max: i32,
}

impl StockDelta {
    /// Create a delta range `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidStockDelta`] if `min > max`.
    pub const fn new(min: i32, max: i32) -> Result<Self, WorldError> {
        if min > max {
            return Err(WorldError::InvalidStockDelta { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lowest delta.
    pub const fn min(self) -> i32 {
        self.min
    }

    /// Highest delta.
    pub const fn max(self) -> i32 {
        self.max
    }

    /// Draw one delta uniformly from the range.
    pub fn sample(self, rng: &mut impl Rng) -> i32 {
        rng.random_range(self.min..=self.max)
    }
}

impl Default for StockDelta {
    fn default() -> Self {
        Self {
            min: DEFAULT_DELTA_MIN,
            max: DEFAULT_DELTA_MAX,
        }
    }
}

/// A stock change applied to one zone during a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockChange {
    /// The zone that changed.
    pub zone_id: ZoneId,
    /// Stock before the cycle.
    pub before: u32,
    /// Stock after clamping.
    pub after: u32,
    /// The delta that was drawn (before clamping).
    pub delta: i32,
}

/// Add `delta` to `current` and clamp the result to `0..=max`.
pub fn clamp_stock(current: u32, delta: i64, max: u32) -> u32 {
    let raw = i64::from(current).saturating_add(delta);
    let clamped = raw.clamp(0, i64::from(max));
    u32::try_from(clamped).unwrap_or(max)
}

/// Run one stock-simulation cycle over every unlocked zone.
///
/// Zones are visited in id order so a seeded generator yields the same
/// result every run. Returns only the zones whose stock actually moved.
pub fn simulate_stock_cycle(
    map: &mut YardMap,
    range: StockDelta,
    rng: &mut impl Rng,
) -> Vec<StockChange> {
    let mut changes = Vec::new();
    for (zone_id, zone) in map.zones_mut() {
        if zone.locked {
            continue;
        }
        let delta = range.sample(rng);
        let before = zone.current_stock;
        let after = clamp_stock(before, i64::from(delta), zone.max_capacity);
        zone.current_stock = after;
        if after != before {
            changes.push(StockChange {
                zone_id: zone_id.clone(),
                before,
                after,
                delta,
            });
        }
    }
    debug!(changed_zones = changes.len(), "Stock cycle applied");
    changes
}
