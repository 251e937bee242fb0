//! Snapshot callback that logs periodic yard status.
//!
//! Every `interval` animation ticks, this callback emits one `info` line
//! with the aggregate yard statistics. Zones that newly cross into the
//! critical band are reported at `warn` as soon as they are seen.

use std::collections::BTreeSet;

use timberyard_core::runner::SnapshotCallback;
use timberyard_types::{YardSnapshot, ZoneId};
use tracing::{debug, info, warn};

/// Callback that turns the snapshot stream into status log lines.
pub struct StatusCallback {
    interval: u64,
    last_logged_tick: Option<u64>,
    critical: BTreeSet<ZoneId>,
}

impl StatusCallback {
    /// Log status every `interval` ticks. An interval of 0 disables the
    /// periodic line but keeps critical-zone warnings.
    pub const fn new(interval: u64) -> Self {
        Self {
            interval,
            last_logged_tick: None,
            critical: BTreeSet::new(),
        }
    }

    fn is_status_tick(&self, tick: u64) -> bool {
        tick > 0
            && tick.checked_rem(self.interval) == Some(0)
            && self.last_logged_tick != Some(tick)
    }
}

impl SnapshotCallback for StatusCallback {
    fn on_snapshot(&mut self, snapshot: &YardSnapshot) {
        let now_critical: BTreeSet<ZoneId> =
            snapshot.stats.critical_zones.iter().cloned().collect();
        for zone in now_critical.difference(&self.critical) {
            let stock = snapshot.zones.get(zone).map(|z| z.current_stock);
            let capacity = snapshot.zones.get(zone).map(|z| z.max_capacity);
            warn!(zone = %zone, stock, capacity, "Zone above 90% capacity");
        }
        for zone in self.critical.difference(&now_critical) {
            debug!(zone = %zone, "Zone left the critical band");
        }
        self.critical = now_critical;

        if self.is_status_tick(snapshot.tick) {
            self.last_logged_tick = Some(snapshot.tick);
            let stats = &snapshot.stats;
            info!(
                tick = snapshot.tick,
                stock_cycles = snapshot.stock_cycles,
                total_stock = stats.total_stock,
                total_capacity = stats.total_capacity,
                utilization_pct = stats.utilization_pct,
                critical_zones = stats.critical_zones.len(),
                moving_loaders = stats.moving_loaders,
                "Yard status"
            );
        }
    }
}
