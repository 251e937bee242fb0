//! Enumeration types for the Timberyard simulation.
//!
//! All variants serialize in `snake_case` so the wire form matches the
//! category names used by the yard dataset (`log`, `sorting`, `moving`).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Zone categories
// ---------------------------------------------------------------------------

/// The operational category of an inventory zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ZoneType {
    /// Raw log storage grouped by species.
    Log,
    /// Sorting area where logs are graded.
    Sorting,
    /// Short-term buffer between sorting and dispatch.
    Buffer,
    /// Truck loading bay.
    Truck,
    /// Emergency overflow storage.
    Overflow,
    /// Processing facility.
    Production,
    /// Restricted stem zone, reachable only by privileged loaders.
    Stem,
}

impl ZoneType {
    /// Human-readable label shown in legends.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Log => "Log Storage",
            Self::Sorting => "Sorting",
            Self::Buffer => "Buffer",
            Self::Truck => "Truck Bay",
            Self::Overflow => "Overflow",
            Self::Production => "Production",
            Self::Stem => "Stem Zone",
        }
    }
}

// ---------------------------------------------------------------------------
// Loader status
// ---------------------------------------------------------------------------

/// What a loader is doing during the current tick.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LoaderStatus {
    /// Parked, not assigned to motion.
    Idle,
    /// Travelling along its current path.
    #[default]
    Moving,
    /// Dwelling at the start of a path while taking on logs.
    Loading,
    /// Dwelling while discharging logs.
    Unloading,
}

// ---------------------------------------------------------------------------
// Capacity tiers
// ---------------------------------------------------------------------------

/// Fill-level band of a zone, used to pick its display color.
///
/// | Tier       | Fill ratio            | Color     |
/// |------------|-----------------------|-----------|
/// | `Neutral`  | not stock-tracked     | `#6b7280` |
/// | `Normal`   | `< 0.70`              | `#16a34a` |
/// | `Warning`  | `0.70 ..= 0.90`       | `#f97316` |
/// | `Critical` | `> 0.90`              | `#dc2626` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CapacityTier {
    /// The zone has no capacity (`max_capacity == 0`).
    Neutral,
    /// Comfortably below the warning threshold.
    Normal,
    /// Between 70% and 90% full, both ends inclusive.
    Warning,
    /// Strictly above 90% full.
    Critical,
}

impl CapacityTier {
    /// Hex color the renderer uses for this tier.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Neutral => "#6b7280",
            Self::Normal => "#16a34a",
            Self::Warning => "#f97316",
            Self::Critical => "#dc2626",
        }
    }

    /// Whether the zone is strictly above 90% full.
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Critical)
    }
}

// ---------------------------------------------------------------------------
// Path-sequence transition effects
// ---------------------------------------------------------------------------

/// Effect applied to a cyclic loader's load when it switches onto a path.
///
/// Paths without an entry in the transition table leave the load untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TransitionEffect {
    /// The loader departs fully loaded (`carrying_logs = max_load`).
    Fill,
    /// The loader departs empty (`carrying_logs = 0`).
    Empty,
}
