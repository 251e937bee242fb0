//! Core entity structs for the Timberyard simulation.
//!
//! [`Zone`] and [`Path`] are created once from the static yard dataset and
//! never deleted. [`Loader`] is rewritten every animation tick, but only its
//! numeric and status fields change.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{LoaderStatus, ZoneType};
use crate::ids::{LoaderId, PathId, ZoneId};

// ---------------------------------------------------------------------------
// GeoPoint
// ---------------------------------------------------------------------------

/// A geographic coordinate treated as a planar point.
///
/// Distances between points are plain Euclidean distances in degrees. The
/// yard spans a few hundred metres, so no projection correction is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Sentinel returned for empty or degenerate polylines.
    pub const ZERO: Self = Self { lat: 0.0, lng: 0.0 };

    /// Create a point from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Planar distance to another point.
    pub fn distance_to(self, other: Self) -> f64 {
        (other.lat - self.lat).hypot(other.lng - self.lng)
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            lat: t.mul_add(other.lat - self.lat, self.lat),
            lng: t.mul_add(other.lng - self.lng, self.lng),
        }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

// ---------------------------------------------------------------------------
// Zone
// ---------------------------------------------------------------------------

/// An inventory area drawn as a closed polygon on the yard map.
///
/// Invariant: `current_stock <= max_capacity`. A `max_capacity` of 0 marks a
/// zone that is not stock-tracked (e.g. a restricted area).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Zone {
    /// Unique zone identifier.
    pub id: ZoneId,
    /// Display name.
    pub name: String,
    /// Operational category.
    pub zone_type: ZoneType,
    /// Closed ring of boundary points.
    pub polygon: Vec<GeoPoint>,
    /// Species stored here, for log zones.
    #[serde(default)]
    pub log_type: Option<String>,
    /// Maximum number of logs the zone holds (0 = not tracked).
    pub max_capacity: u32,
    /// Logs currently stored.
    pub current_stock: u32,
    /// Base display color.
    pub color: String,
    /// Locked zones have immutable stock and are left out of aggregate stats.
    #[serde(default)]
    pub locked: bool,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Zone {
    /// Whether the zone participates in stock tracking at all.
    pub const fn is_stock_tracked(&self) -> bool {
        self.max_capacity > 0
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A one-way transport route that loaders traverse from start to end.
///
/// The zone references are descriptive only; nothing checks that the
/// polyline actually touches the referenced zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Path {
    /// Unique path identifier.
    pub id: PathId,
    /// Display name.
    pub name: String,
    /// Ordered polyline, at least two points.
    pub points: Vec<GeoPoint>,
    /// Zone the path departs from.
    pub from_zone_id: ZoneId,
    /// Zone the path arrives at.
    pub to_zone_id: ZoneId,
    /// Optional display color.
    #[serde(default)]
    pub color: Option<String>,
    /// Loaders permitted on this path. `None` means unrestricted.
    #[serde(default)]
    pub allowed_loader_ids: Option<BTreeSet<LoaderId>>,
}

impl Path {
    /// Whether the given loader may traverse this path.
    pub fn permits(&self, loader: &LoaderId) -> bool {
        self.allowed_loader_ids
            .as_ref()
            .is_none_or(|allowed| allowed.contains(loader))
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// A loader vehicle moving logs along the yard's paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Loader {
    /// Unique loader identifier.
    pub id: LoaderId,
    /// Display name.
    pub name: String,
    /// Path the loader is currently on.
    pub path_id: PathId,
    /// Fraction of the current path's length already travelled (0.0 to 1.0).
    pub progress: f64,
    /// Progress added per animation tick. Strictly positive.
    pub speed: f64,
    /// Current activity.
    #[serde(default)]
    pub status: LoaderStatus,
    /// Logs on board (`0..=max_load`).
    pub carrying_logs: u32,
    /// Maximum logs the loader can carry.
    pub max_load: u32,
    /// Display color.
    pub color: String,
    /// Cyclic route of path ids. Empty for loaders that shuttle on one path.
    #[serde(default)]
    pub path_sequence: Vec<PathId>,
    /// Privileged variant allowed into the stem zone.
    #[serde(default)]
    pub can_access_stem_zone: bool,
}

impl Loader {
    /// Whether the loader follows a multi-path cycle.
    pub const fn is_cyclic(&self) -> bool {
        !self.path_sequence.is_empty()
    }
}
