//! Render snapshots handed to the presentation layer.
//!
//! The core publishes one [`YardSnapshot`] after every applied animation
//! tick and every stock cycle. Snapshots are plain values: the renderer can
//! hold on to one for as long as it likes without observing later mutation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{CapacityTier, LoaderStatus, ZoneType};
use crate::ids::{LoaderId, PathId, ZoneId};
use crate::structs::GeoPoint;

/// Per-loader render state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LoaderView {
    /// Loader identifier.
    pub id: LoaderId,
    /// Display name.
    pub name: String,
    /// Path the loader is on.
    pub path_id: PathId,
    /// Progress along that path.
    pub progress: f64,
    /// Interpolated map position. `None` while the path reference is unresolved.
    pub position: Option<GeoPoint>,
    /// Current activity.
    pub status: LoaderStatus,
    /// Logs on board.
    pub carrying_logs: u32,
    /// Load capacity.
    pub max_load: u32,
    /// Display color.
    pub color: String,
    /// Privileged stem-zone loader (drawn larger).
    pub can_access_stem_zone: bool,
}

/// Per-zone render state with derived capacity figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ZoneView {
    /// Zone identifier.
    pub id: ZoneId,
    /// Display name.
    pub name: String,
    /// Operational category.
    pub zone_type: ZoneType,
    /// Logs currently stored.
    pub current_stock: u32,
    /// Maximum capacity.
    pub max_capacity: u32,
    /// Whether the zone is locked.
    pub locked: bool,
    /// Fill percentage rounded to the nearest integer.
    pub fill_pct: u32,
    /// Fill band.
    pub tier: CapacityTier,
    /// Fill color derived from the tier.
    pub fill_color: String,
}

/// Presentation-only toggles. They never influence the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DisplayOptions {
    /// Draw path polylines.
    pub show_paths: bool,
    /// Draw loader markers.
    pub show_loaders: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_paths: true,
            show_loaders: true,
        }
    }
}

/// Aggregate yard statistics over unlocked zones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct YardStats {
    /// Sum of `current_stock` over unlocked zones.
    pub total_stock: u64,
    /// Sum of `max_capacity` over unlocked zones.
    pub total_capacity: u64,
    /// `total_stock / total_capacity` as a rounded percentage (0 if no capacity).
    pub utilization_pct: u32,
    /// Unlocked, stock-tracked zones strictly above 90% full.
    pub critical_zones: Vec<ZoneId>,
    /// Loaders whose status is `moving`.
    pub moving_loaders: u32,
}

/// Full render snapshot of the yard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct YardSnapshot {
    /// Number of animation ticks applied so far.
    pub tick: u64,
    /// Number of stock-simulation cycles applied so far.
    pub stock_cycles: u64,
    /// Whether the schedulers are currently running.
    pub running: bool,
    /// Loader states keyed by loader id.
    pub loaders: BTreeMap<LoaderId, LoaderView>,
    /// Zone states keyed by zone id.
    pub zones: BTreeMap<ZoneId, ZoneView>,
    /// The zone currently selected in the UI, read from `zones`.
    pub selected_zone: Option<ZoneView>,
    /// Presentation toggles.
    pub display: DisplayOptions,
    /// Aggregate statistics.
    pub stats: YardStats,
}
