//! Per-tick orchestration of the yard state.
//!
//! [`YardState`] bundles everything the two timers mutate: the yard map,
//! the loader fleet, the transition table and the seeded generator. Two
//! entry points advance it:
//!
//! - [`run_animation_tick`] steps every loader once through the state
//!   machine and records their interpolated positions.
//! - [`run_stock_cycle`] perturbs the stock of every unlocked zone.
//!
//! Both bodies are synchronous and run to completion. The scheduler holds
//! the state behind one mutex, so they never interleave.
//!
//! The UI-facing control operations (manual stock adjustment, zone
//! selection, display toggles) live here too, and [`YardState::snapshot`]
//! renders the whole thing for the presentation layer.

use std::collections::{BTreeMap, BTreeSet};

use rand::SeedableRng;
use rand::rngs::StdRng;
use timberyard_types::{
    DisplayOptions, GeoPoint, Loader, LoaderId, LoaderStatus, LoaderView, YardSnapshot, YardStats,
    ZoneId,
};
use timberyard_world::{
    StockChange, StockDelta, TransitionTable, WorldError, YardMap, interpolate_along_path,
    simulate_stock_cycle, validate_fleet,
};
use tracing::{debug, info, warn};

use crate::loader::{StepOutcome, advance_loaders};

/// Summary of a single animation tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Loaders that moved along their current path.
    pub advanced: u32,
    /// Loaders that finished a path this tick.
    pub completed: u32,
    /// Loaders held back by a path allow-list.
    pub blocked: u32,
    /// Loaders whose path id does not resolve.
    pub stalled: u32,
    /// Loaders whose status is `moving` after the tick.
    pub moving: u32,
}

/// Summary of a single stock cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockCycleSummary {
    /// The cycle number that was executed.
    pub cycle: u64,
    /// Zones whose stock changed.
    pub changes: Vec<StockChange>,
}

/// The mutable yard state driven by the scheduler.
#[derive(Debug)]
pub struct YardState {
    map: YardMap,
    loaders: Vec<Loader>,
    transitions: TransitionTable,
    stock_delta: StockDelta,
    rng: StdRng,
    tick: u64,
    stock_cycles: u64,
    running: bool,
    display: DisplayOptions,
    selected_zone: Option<ZoneId>,
    /// Last interpolated position per loader. Absent while the path is unresolved.
    positions: BTreeMap<LoaderId, GeoPoint>,
    /// Loaders already reported as stalled on a missing path.
    reported_stalls: BTreeSet<LoaderId>,
}

impl YardState {
    /// Build the state from a yard and its fleet.
    ///
    /// The fleet is validated up front; path references are not, since a
    /// loader on an unknown path simply stalls.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if a loader id repeats or a loader violates
    /// its numeric preconditions.
    pub fn new(
        map: YardMap,
        loaders: Vec<Loader>,
        transitions: TransitionTable,
        stock_delta: StockDelta,
        seed: u64,
    ) -> Result<Self, WorldError> {
        validate_fleet(&loaders)?;
        let positions = loaders
            .iter()
            .filter_map(|loader| {
                map.path(&loader.path_id).map(|path| {
                    (
                        loader.id.clone(),
                        interpolate_along_path(&path.points, loader.progress),
                    )
                })
            })
            .collect();
        Ok(Self {
            map,
            loaders,
            transitions,
            stock_delta,
            rng: StdRng::seed_from_u64(seed),
            tick: 0,
            stock_cycles: 0,
            running: false,
            display: DisplayOptions::default(),
            selected_zone: None,
            positions,
            reported_stalls: BTreeSet::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The yard map.
    pub const fn map(&self) -> &YardMap {
        &self.map
    }

    /// The loader fleet in its current state.
    pub fn loaders(&self) -> &[Loader] {
        &self.loaders
    }

    /// Look up a loader by id.
    pub fn loader(&self, id: &LoaderId) -> Option<&Loader> {
        self.loaders.iter().find(|l| l.id == *id)
    }

    /// Last interpolated position of a loader.
    pub fn position(&self, id: &LoaderId) -> Option<GeoPoint> {
        self.positions.get(id).copied()
    }

    /// The transition table in effect.
    pub const fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Animation ticks applied so far.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Stock cycles applied so far.
    pub const fn stock_cycles(&self) -> u64 {
        self.stock_cycles
    }

    /// Whether the scheduler reports the simulation as running.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) const fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Current display toggles.
    pub const fn display(&self) -> DisplayOptions {
        self.display
    }

    /// The selected zone id, if any.
    pub const fn selected_zone(&self) -> Option<&ZoneId> {
        self.selected_zone.as_ref()
    }

    /// Aggregate statistics over unlocked zones and the fleet.
    pub fn stats(&self) -> YardStats {
        self.map.stats(&self.loaders)
    }

    // -----------------------------------------------------------------------
    // Control operations
    // -----------------------------------------------------------------------

    /// Clamp-add `delta` to a zone's stock and return the new stock.
    ///
    /// A selected zone needs no extra bookkeeping: its view is read from the
    /// zone map at snapshot time.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ZoneNotFound`] or [`WorldError::ZoneLocked`].
    pub fn adjust_stock(&mut self, zone: &ZoneId, delta: i64) -> Result<u32, WorldError> {
        self.map.adjust_stock(zone, delta)
    }

    /// Mark a zone as selected in the UI.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ZoneNotFound`] if the zone does not exist.
    pub fn select_zone(&mut self, zone: ZoneId) -> Result<(), WorldError> {
        if self.map.zone(&zone).is_none() {
            return Err(WorldError::ZoneNotFound(zone));
        }
        debug!(zone = %zone, "Zone selected");
        self.selected_zone = Some(zone);
        Ok(())
    }

    /// Clear the UI selection.
    pub fn clear_selection(&mut self) {
        self.selected_zone = None;
    }

    /// Toggle path drawing. Presentation only.
    pub const fn set_show_paths(&mut self, show: bool) {
        self.display.show_paths = show;
    }

    /// Toggle loader drawing. Presentation only.
    pub const fn set_show_loaders(&mut self, show: bool) {
        self.display.show_loaders = show;
    }

    // -----------------------------------------------------------------------
    // Snapshot
    // -----------------------------------------------------------------------

    /// Render the current state for the presentation layer.
    pub fn snapshot(&self) -> YardSnapshot {
        let loaders = self
            .loaders
            .iter()
            .map(|loader| {
                let view = LoaderView {
                    id: loader.id.clone(),
                    name: loader.name.clone(),
                    path_id: loader.path_id.clone(),
                    progress: loader.progress,
                    position: self.position(&loader.id),
                    status: loader.status,
                    carrying_logs: loader.carrying_logs,
                    max_load: loader.max_load,
                    color: loader.color.clone(),
                    can_access_stem_zone: loader.can_access_stem_zone,
                };
                (loader.id.clone(), view)
            })
            .collect();
        let zones = self.map.zone_views();
        let selected_zone = self
            .selected_zone
            .as_ref()
            .and_then(|id| zones.get(id).cloned());

        YardSnapshot {
            tick: self.tick,
            stock_cycles: self.stock_cycles,
            running: self.running,
            loaders,
            zones,
            selected_zone,
            display: self.display,
            stats: self.stats(),
        }
    }
}

/// Advance every loader by one tick.
pub fn run_animation_tick(state: &mut YardState) -> TickSummary {
    let steps = advance_loaders(
        &state.loaders,
        &state.map,
        &state.transitions,
        &mut state.rng,
    );

    state.tick = state.tick.saturating_add(1);
    let mut summary = TickSummary {
        tick: state.tick,
        ..TickSummary::default()
    };

    let mut next_loaders = Vec::with_capacity(steps.len());
    for step in steps {
        let id = step.loader.id.clone();
        match step.outcome {
            StepOutcome::Advanced => summary.advanced = summary.advanced.saturating_add(1),
            StepOutcome::Completed => summary.completed = summary.completed.saturating_add(1),
            StepOutcome::Blocked => summary.blocked = summary.blocked.saturating_add(1),
            StepOutcome::PathMissing => {
                summary.stalled = summary.stalled.saturating_add(1);
                if state.reported_stalls.insert(id.clone()) {
                    warn!(
                        loader = %id,
                        path = %step.loader.path_id,
                        "Loader references an unknown path and will not move"
                    );
                }
            }
        }
        if step.outcome != StepOutcome::PathMissing {
            state.reported_stalls.remove(&id);
        }
        if step.loader.status == LoaderStatus::Moving {
            summary.moving = summary.moving.saturating_add(1);
        }
        match step.position {
            Some(point) => {
                state.positions.insert(id, point);
            }
            None => {
                state.positions.remove(&id);
            }
        }
        next_loaders.push(step.loader);
    }
    state.loaders = next_loaders;

    debug!(
        tick = summary.tick,
        advanced = summary.advanced,
        completed = summary.completed,
        blocked = summary.blocked,
        stalled = summary.stalled,
        "Animation tick applied"
    );
    summary
}

/// Run one stock-simulation cycle over the unlocked zones.
pub fn run_stock_cycle(state: &mut YardState) -> StockCycleSummary {
    let changes = simulate_stock_cycle(&mut state.map, state.stock_delta, &mut state.rng);
    state.stock_cycles = state.stock_cycles.saturating_add(1);
    info!(
        cycle = state.stock_cycles,
        changed_zones = changes.len(),
        "Stock cycle applied"
    );
    StockCycleSummary {
        cycle: state.stock_cycles,
        changes,
    }
}
