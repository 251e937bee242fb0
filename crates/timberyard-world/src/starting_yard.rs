//! Default starting yard for the Timberyard simulation.
//!
//! Creates the Rotorua timber yard: 15 inventory zones (the stem zone and
//! the production house are locked), 16 one-way transport paths, five
//! shuttle loaders, and the privileged stem loader that cycles between the
//! stem zone and the production house. All coordinates are `(lat, lng)`.
#![allow(clippy::unreadable_literal, clippy::excessive_precision)]

use std::collections::BTreeSet;

use timberyard_types::{
    GeoPoint, Loader, LoaderId, LoaderStatus, Path, PathId, TransitionEffect, Zone, ZoneId,
    ZoneType,
};

use crate::error::WorldError;
use crate::fleet::validate_fleet;
use crate::transitions::TransitionTable;
use crate::yard_map::YardMap;

/// Id of the privileged stem loader.
pub const STEM_LOADER_ID: &str = "loader-wagner";

/// Path the stem loader takes from the stem zone to production, loaded.
pub const STEM_TO_PRODUCTION_PATH_ID: &str = "path-wagner-stem-to-production";

/// Path the stem loader takes back to the stem zone, empty.
pub const PRODUCTION_TO_STEM_PATH_ID: &str = "path-wagner-production-to-stem";

/// Static description of a zone.
struct ZoneSpec {
    id: &'static str,
    name: &'static str,
    zone_type: ZoneType,
    polygon: &'static [(f64, f64)],
    log_type: Option<&'static str>,
    max_capacity: u32,
    current_stock: u32,
    color: &'static str,
    locked: bool,
    description: Option<&'static str>,
}

/// Static description of a path.
struct PathSpec {
    id: &'static str,
    name: &'static str,
    from: &'static str,
    to: &'static str,
    color: &'static str,
    points: &'static [(f64, f64)],
}

// --- Zone polygons ---

const STEM_ZONE_POLYGON: &[(f64, f64)] = &[
    (-38.408500137452926, 176.5460647583282),
    (-38.40860943005638, 176.54808177946748),
    (-38.4109297570927, 176.548328542692),
    (-38.41092135024517, 176.5460003853131),
    (-38.40855898733686, 176.54576435092446),
    (-38.409391287735225, 176.54447689062218),
    (-38.408500137452926, 176.5460647583282),
];

const PRODUCTION_HOUSE_POLYGON: &[(f64, f64)] = &[
    (-38.409357659605526, 176.54604330065246),
    (-38.413056658103805, 176.54597892763738),
    (-38.413056658103805, 176.54532446865068),
    (-38.40898774934143, 176.5451528072771),
    (-38.409357659605526, 176.54604330065246),
];

const LOG_ZONE_PINE_1_POLYGON: &[(f64, f64)] = &[
    (-38.40870, 176.54870),
    (-38.40870, 176.54960),
    (-38.40920, 176.54960),
    (-38.40920, 176.54870),
    (-38.40870, 176.54870),
];

const LOG_ZONE_PINE_2_POLYGON: &[(f64, f64)] = &[
    (-38.40930, 176.54870),
    (-38.40930, 176.54960),
    (-38.40980, 176.54960),
    (-38.40980, 176.54870),
    (-38.40930, 176.54870),
];

const LOG_ZONE_EUCALYPTUS_POLYGON: &[(f64, f64)] = &[
    (-38.40870, 176.54970),
    (-38.40870, 176.55050),
    (-38.40930, 176.55050),
    (-38.40930, 176.54970),
    (-38.40870, 176.54970),
];

const LOG_ZONE_HARDWOOD_POLYGON: &[(f64, f64)] = &[
    (-38.40990, 176.54870),
    (-38.40990, 176.54960),
    (-38.41040, 176.54960),
    (-38.41040, 176.54870),
    (-38.40990, 176.54870),
];

const SORTING_ZONE_1_POLYGON: &[(f64, f64)] = &[
    (-38.41050, 176.54870),
    (-38.41050, 176.54940),
    (-38.41100, 176.54940),
    (-38.41100, 176.54870),
    (-38.41050, 176.54870),
];

const SORTING_ZONE_2_POLYGON: &[(f64, f64)] = &[
    (-38.41050, 176.54950),
    (-38.41050, 176.55020),
    (-38.41100, 176.55020),
    (-38.41100, 176.54950),
    (-38.41050, 176.54950),
];

const BUFFER_ZONE_1_POLYGON: &[(f64, f64)] = &[
    (-38.41110, 176.54870),
    (-38.41110, 176.54960),
    (-38.41160, 176.54960),
    (-38.41160, 176.54870),
    (-38.41110, 176.54870),
];

const BUFFER_ZONE_2_POLYGON: &[(f64, f64)] = &[
    (-38.41110, 176.54970),
    (-38.41110, 176.55050),
    (-38.41160, 176.55050),
    (-38.41160, 176.54970),
    (-38.41110, 176.54970),
];

const TRUCK_ZONE_1_POLYGON: &[(f64, f64)] = &[
    (-38.41170, 176.54870),
    (-38.41170, 176.54960),
    (-38.41240, 176.54960),
    (-38.41240, 176.54870),
    (-38.41170, 176.54870),
];

const TRUCK_ZONE_2_POLYGON: &[(f64, f64)] = &[
    (-38.41170, 176.54970),
    (-38.41170, 176.55050),
    (-38.41240, 176.55050),
    (-38.41240, 176.54970),
    (-38.41170, 176.54970),
];

const TRUCK_ZONE_3_POLYGON: &[(f64, f64)] = &[
    (-38.41250, 176.54870),
    (-38.41250, 176.55050),
    (-38.41340, 176.55050),
    (-38.41340, 176.54870),
    (-38.41250, 176.54870),
];

const OVERFLOW_ZONE_1_POLYGON: &[(f64, f64)] = &[
    (-38.40860, 176.54620),
    (-38.40860, 176.54700),
    (-38.40910, 176.54700),
    (-38.40910, 176.54620),
    (-38.40860, 176.54620),
];

const OVERFLOW_ZONE_2_POLYGON: &[(f64, f64)] = &[
    (-38.41170, 176.54620),
    (-38.41170, 176.54700),
    (-38.41240, 176.54700),
    (-38.41240, 176.54620),
    (-38.41170, 176.54620),
];

// --- Path polylines ---

const PROD_TO_PINE_A_ROUTE: &[(f64, f64)] = &[
    (-38.41305, 176.54598),
    (-38.41305, 176.54650),
    (-38.41200, 176.54650),
    (-38.41100, 176.54650),
    (-38.41000, 176.54650),
    (-38.40920, 176.54650),
    (-38.40920, 176.54870),
    (-38.40895, 176.54870),
];

const PROD_TO_PINE_B_ROUTE: &[(f64, f64)] = &[
    (-38.41305, 176.54598),
    (-38.41305, 176.54660),
    (-38.41150, 176.54660),
    (-38.40980, 176.54660),
    (-38.40955, 176.54660),
    (-38.40955, 176.54870),
];

const PROD_TO_EUCALYPTUS_ROUTE: &[(f64, f64)] = &[
    (-38.41305, 176.54598),
    (-38.41305, 176.54670),
    (-38.41100, 176.54670),
    (-38.40900, 176.54670),
    (-38.40900, 176.54970),
];

const PROD_TO_HARDWOOD_ROUTE: &[(f64, f64)] = &[
    (-38.41305, 176.54598),
    (-38.41305, 176.54680),
    (-38.41050, 176.54680),
    (-38.41015, 176.54680),
    (-38.41015, 176.54870),
];

const PINE_A_TO_SORTING_1_ROUTE: &[(f64, f64)] = &[
    (-38.40920, 176.54960),
    (-38.40920, 176.54980),
    (-38.40960, 176.54980),
    (-38.41000, 176.54980),
    (-38.41050, 176.54980),
    (-38.41050, 176.54940),
    (-38.41075, 176.54940),
];

const PINE_B_TO_SORTING_1_ROUTE: &[(f64, f64)] = &[
    (-38.40980, 176.54960),
    (-38.40980, 176.54985),
    (-38.41020, 176.54985),
    (-38.41050, 176.54985),
    (-38.41050, 176.54940),
    (-38.41075, 176.54940),
];

const EUCALYPTUS_TO_SORTING_2_ROUTE: &[(f64, f64)] = &[
    (-38.40930, 176.55050),
    (-38.40960, 176.55050),
    (-38.41000, 176.55050),
    (-38.41050, 176.55050),
    (-38.41050, 176.55020),
    (-38.41075, 176.55020),
];

const HARDWOOD_TO_SORTING_2_ROUTE: &[(f64, f64)] = &[
    (-38.41040, 176.54960),
    (-38.41040, 176.54990),
    (-38.41050, 176.54990),
    (-38.41050, 176.55020),
    (-38.41075, 176.55020),
];

const SORTING_1_TO_BUFFER_1_ROUTE: &[(f64, f64)] = &[
    (-38.41100, 176.54940),
    (-38.41110, 176.54940),
    (-38.41110, 176.54960),
    (-38.41135, 176.54960),
];

const SORTING_2_TO_BUFFER_2_ROUTE: &[(f64, f64)] = &[
    (-38.41100, 176.55020),
    (-38.41110, 176.55020),
    (-38.41110, 176.55050),
    (-38.41135, 176.55050),
];

const BUFFER_1_TO_TRUCK_1_ROUTE: &[(f64, f64)] = &[
    (-38.41160, 176.54960),
    (-38.41170, 176.54960),
    (-38.41205, 176.54960),
];

const BUFFER_2_TO_TRUCK_2_ROUTE: &[(f64, f64)] = &[
    (-38.41160, 176.55050),
    (-38.41170, 176.55050),
    (-38.41205, 176.55050),
];

const TRUCK_1_TO_TRUCK_3_ROUTE: &[(f64, f64)] = &[
    (-38.41240, 176.54960),
    (-38.41250, 176.54960),
    (-38.41295, 176.54960),
];

const TRUCK_2_TO_TRUCK_3_ROUTE: &[(f64, f64)] = &[
    (-38.41240, 176.55050),
    (-38.41250, 176.55050),
    (-38.41295, 176.55050),
];

const OVERFLOW_W_TO_PINE_A_ROUTE: &[(f64, f64)] = &[
    (-38.40910, 176.54700),
    (-38.40910, 176.54760),
    (-38.40910, 176.54820),
    (-38.40895, 176.54820),
    (-38.40895, 176.54870),
];

const OVERFLOW_S_TO_SORTING_1_ROUTE: &[(f64, f64)] = &[
    (-38.41240, 176.54700),
    (-38.41240, 176.54760),
    (-38.41240, 176.54820),
    (-38.41240, 176.54870),
    (-38.41200, 176.54870),
    (-38.41160, 176.54870),
    (-38.41100, 176.54870),
    (-38.41075, 176.54870),
    (-38.41075, 176.54940),
];

// Stem loader routes: around the south-east corner of the stem zone and
// into the production house's east face.
const WAGNER_STEM_TO_PRODUCTION_ROUTE: &[(f64, f64)] = &[
    (-38.41080, 176.54700),
    (-38.41110, 176.54700),
    (-38.41110, 176.54620),
    (-38.41000, 176.54620),
    (-38.41000, 176.54603),
];

const WAGNER_PRODUCTION_TO_STEM_ROUTE: &[(f64, f64)] = &[
    (-38.41020, 176.54603),
    (-38.41020, 176.54612),
    (-38.41100, 176.54612),
    (-38.41100, 176.54690),
    (-38.41080, 176.54690),
];

const ZONES: &[ZoneSpec] = &[
    ZoneSpec {
        id: "stem-zone",
        name: "Stem Zone",
        zone_type: ZoneType::Stem,
        polygon: STEM_ZONE_POLYGON,
        log_type: None,
        max_capacity: 0,
        current_stock: 0,
        color: "#6b7280",
        locked: true,
        description: Some("Restricted - No access"),
    },
    ZoneSpec {
        id: "production-house",
        name: "Production House",
        zone_type: ZoneType::Production,
        polygon: PRODUCTION_HOUSE_POLYGON,
        log_type: None,
        max_capacity: 500,
        current_stock: 320,
        color: "#374151",
        locked: true,
        description: Some("Log processing facility"),
    },
    ZoneSpec {
        id: "log-zone-pine-1",
        name: "Pine Log Zone A",
        zone_type: ZoneType::Log,
        polygon: LOG_ZONE_PINE_1_POLYGON,
        log_type: Some("Pine"),
        max_capacity: 200,
        current_stock: 120,
        color: "#16a34a",
        locked: false,
        description: Some("Primary pine log storage"),
    },
    ZoneSpec {
        id: "log-zone-pine-2",
        name: "Pine Log Zone B",
        zone_type: ZoneType::Log,
        polygon: LOG_ZONE_PINE_2_POLYGON,
        log_type: Some("Pine"),
        max_capacity: 200,
        current_stock: 175,
        color: "#16a34a",
        locked: false,
        description: Some("Secondary pine log storage"),
    },
    ZoneSpec {
        id: "log-zone-eucalyptus",
        name: "Eucalyptus Zone",
        zone_type: ZoneType::Log,
        polygon: LOG_ZONE_EUCALYPTUS_POLYGON,
        log_type: Some("Eucalyptus"),
        max_capacity: 150,
        current_stock: 140,
        color: "#15803d",
        locked: false,
        description: Some("Eucalyptus log storage"),
    },
    ZoneSpec {
        id: "log-zone-hardwood",
        name: "Mixed Hardwood Zone",
        zone_type: ZoneType::Log,
        polygon: LOG_ZONE_HARDWOOD_POLYGON,
        log_type: Some("Mixed Hardwood"),
        max_capacity: 180,
        current_stock: 60,
        color: "#166534",
        locked: false,
        description: Some("Mixed hardwood storage"),
    },
    ZoneSpec {
        id: "sorting-zone-1",
        name: "Sorting Zone Alpha",
        zone_type: ZoneType::Sorting,
        polygon: SORTING_ZONE_1_POLYGON,
        log_type: None,
        max_capacity: 100,
        current_stock: 45,
        color: "#2563eb",
        locked: false,
        description: Some("Primary log sorting area"),
    },
    ZoneSpec {
        id: "sorting-zone-2",
        name: "Sorting Zone Beta",
        zone_type: ZoneType::Sorting,
        polygon: SORTING_ZONE_2_POLYGON,
        log_type: None,
        max_capacity: 100,
        current_stock: 80,
        color: "#1d4ed8",
        locked: false,
        description: Some("Secondary log sorting area"),
    },
    ZoneSpec {
        id: "buffer-zone-1",
        name: "Buffer Zone North",
        zone_type: ZoneType::Buffer,
        polygon: BUFFER_ZONE_1_POLYGON,
        log_type: None,
        max_capacity: 80,
        current_stock: 30,
        color: "#7c3aed",
        locked: false,
        description: Some("Temporary buffer storage"),
    },
    ZoneSpec {
        id: "buffer-zone-2",
        name: "Buffer Zone East",
        zone_type: ZoneType::Buffer,
        polygon: BUFFER_ZONE_2_POLYGON,
        log_type: None,
        max_capacity: 80,
        current_stock: 72,
        color: "#6d28d9",
        locked: false,
        description: Some("East buffer storage"),
    },
    ZoneSpec {
        id: "truck-zone-1",
        name: "Truck Bay 1",
        zone_type: ZoneType::Truck,
        polygon: TRUCK_ZONE_1_POLYGON,
        log_type: None,
        max_capacity: 60,
        current_stock: 20,
        color: "#b45309",
        locked: false,
        description: Some("Truck loading bay 1"),
    },
    ZoneSpec {
        id: "truck-zone-2",
        name: "Truck Bay 2",
        zone_type: ZoneType::Truck,
        polygon: TRUCK_ZONE_2_POLYGON,
        log_type: None,
        max_capacity: 60,
        current_stock: 55,
        color: "#92400e",
        locked: false,
        description: Some("Truck loading bay 2"),
    },
    ZoneSpec {
        id: "truck-zone-3",
        name: "Truck Bay 3",
        zone_type: ZoneType::Truck,
        polygon: TRUCK_ZONE_3_POLYGON,
        log_type: None,
        max_capacity: 80,
        current_stock: 10,
        color: "#78350f",
        locked: false,
        description: Some("Large truck loading bay"),
    },
    ZoneSpec {
        id: "overflow-zone-1",
        name: "Overflow Zone West",
        zone_type: ZoneType::Overflow,
        polygon: OVERFLOW_ZONE_1_POLYGON,
        log_type: None,
        max_capacity: 120,
        current_stock: 95,
        color: "#dc2626",
        locked: false,
        description: Some("Emergency overflow storage"),
    },
    ZoneSpec {
        id: "overflow-zone-2",
        name: "Overflow Zone South",
        zone_type: ZoneType::Overflow,
        polygon: OVERFLOW_ZONE_2_POLYGON,
        log_type: None,
        max_capacity: 100,
        current_stock: 40,
        color: "#b91c1c",
        locked: false,
        description: Some("South overflow storage"),
    },
];

const PATHS: &[PathSpec] = &[
    PathSpec {
        id: "path-prod-to-pine-a",
        name: "Production -> Pine A",
        from: "production-house",
        to: "log-zone-pine-1",
        color: "#f59e0b",
        points: PROD_TO_PINE_A_ROUTE,
    },
    PathSpec {
        id: "path-prod-to-pine-b",
        name: "Production -> Pine B",
        from: "production-house",
        to: "log-zone-pine-2",
        color: "#f59e0b",
        points: PROD_TO_PINE_B_ROUTE,
    },
    PathSpec {
        id: "path-prod-to-eucalyptus",
        name: "Production -> Eucalyptus",
        from: "production-house",
        to: "log-zone-eucalyptus",
        color: "#f59e0b",
        points: PROD_TO_EUCALYPTUS_ROUTE,
    },
    PathSpec {
        id: "path-prod-to-hardwood",
        name: "Production -> Hardwood",
        from: "production-house",
        to: "log-zone-hardwood",
        color: "#f59e0b",
        points: PROD_TO_HARDWOOD_ROUTE,
    },
    PathSpec {
        id: "path-pine-a-to-sorting-1",
        name: "Pine A -> Sorting Alpha",
        from: "log-zone-pine-1",
        to: "sorting-zone-1",
        color: "#06b6d4",
        points: PINE_A_TO_SORTING_1_ROUTE,
    },
    PathSpec {
        id: "path-pine-b-to-sorting-1",
        name: "Pine B -> Sorting Alpha",
        from: "log-zone-pine-2",
        to: "sorting-zone-1",
        color: "#06b6d4",
        points: PINE_B_TO_SORTING_1_ROUTE,
    },
    PathSpec {
        id: "path-eucalyptus-to-sorting-2",
        name: "Eucalyptus -> Sorting Beta",
        from: "log-zone-eucalyptus",
        to: "sorting-zone-2",
        color: "#06b6d4",
        points: EUCALYPTUS_TO_SORTING_2_ROUTE,
    },
    PathSpec {
        id: "path-hardwood-to-sorting-2",
        name: "Hardwood -> Sorting Beta",
        from: "log-zone-hardwood",
        to: "sorting-zone-2",
        color: "#06b6d4",
        points: HARDWOOD_TO_SORTING_2_ROUTE,
    },
    PathSpec {
        id: "path-sorting-1-to-buffer-1",
        name: "Sorting Alpha -> Buffer North",
        from: "sorting-zone-1",
        to: "buffer-zone-1",
        color: "#8b5cf6",
        points: SORTING_1_TO_BUFFER_1_ROUTE,
    },
    PathSpec {
        id: "path-sorting-2-to-buffer-2",
        name: "Sorting Beta -> Buffer East",
        from: "sorting-zone-2",
        to: "buffer-zone-2",
        color: "#8b5cf6",
        points: SORTING_2_TO_BUFFER_2_ROUTE,
    },
    PathSpec {
        id: "path-buffer-1-to-truck-1",
        name: "Buffer North -> Truck Bay 1",
        from: "buffer-zone-1",
        to: "truck-zone-1",
        color: "#f97316",
        points: BUFFER_1_TO_TRUCK_1_ROUTE,
    },
    PathSpec {
        id: "path-buffer-2-to-truck-2",
        name: "Buffer East -> Truck Bay 2",
        from: "buffer-zone-2",
        to: "truck-zone-2",
        color: "#f97316",
        points: BUFFER_2_TO_TRUCK_2_ROUTE,
    },
    PathSpec {
        id: "path-truck-1-to-truck-3",
        name: "Truck Bay 1 -> Bay 3",
        from: "truck-zone-1",
        to: "truck-zone-3",
        color: "#ea580c",
        points: TRUCK_1_TO_TRUCK_3_ROUTE,
    },
    PathSpec {
        id: "path-truck-2-to-truck-3",
        name: "Truck Bay 2 -> Bay 3",
        from: "truck-zone-2",
        to: "truck-zone-3",
        color: "#ea580c",
        points: TRUCK_2_TO_TRUCK_3_ROUTE,
    },
    PathSpec {
        id: "path-overflow-w-to-pine-a",
        name: "Overflow West -> Pine A",
        from: "overflow-zone-1",
        to: "log-zone-pine-1",
        color: "#ef4444",
        points: OVERFLOW_W_TO_PINE_A_ROUTE,
    },
    PathSpec {
        id: "path-overflow-s-to-sorting-1",
        name: "Overflow South -> Sorting Alpha",
        from: "overflow-zone-2",
        to: "sorting-zone-1",
        color: "#ef4444",
        points: OVERFLOW_S_TO_SORTING_1_ROUTE,
    },
];

/// Convert raw `(lat, lng)` pairs into [`GeoPoint`]s.
fn points(raw: &[(f64, f64)]) -> Vec<GeoPoint> {
    raw.iter().copied().map(GeoPoint::from).collect()
}

/// Helper to build a [`Zone`] from its static description.
fn zone(spec: &ZoneSpec) -> Zone {
    Zone {
        id: ZoneId::from(spec.id),
        name: spec.name.to_owned(),
        zone_type: spec.zone_type,
        polygon: points(spec.polygon),
        log_type: spec.log_type.map(str::to_owned),
        max_capacity: spec.max_capacity,
        current_stock: spec.current_stock,
        color: spec.color.to_owned(),
        locked: spec.locked,
        description: spec.description.map(str::to_owned),
    }
}

/// Helper to build an unrestricted one-way [`Path`].
fn path(spec: &PathSpec) -> Path {
    Path {
        id: PathId::from(spec.id),
        name: spec.name.to_owned(),
        points: points(spec.points),
        from_zone_id: ZoneId::from(spec.from),
        to_zone_id: ZoneId::from(spec.to),
        color: Some(spec.color.to_owned()),
        allowed_loader_ids: None,
    }
}

/// Helper to build a path only the stem loader may use.
fn stem_loader_path(
    id: &str,
    name: &str,
    from: &str,
    to: &str,
    raw: &[(f64, f64)],
) -> Path {
    Path {
        id: PathId::from(id),
        name: name.to_owned(),
        points: points(raw),
        from_zone_id: ZoneId::from(from),
        to_zone_id: ZoneId::from(to),
        color: Some("#facc15".to_owned()),
        allowed_loader_ids: Some(BTreeSet::from([LoaderId::from(STEM_LOADER_ID)])),
    }
}

/// Helper to build a shuttle [`Loader`] that repeats a single path.
fn shuttle(
    id: &str,
    name: &str,
    path_id: &str,
    progress: f64,
    speed: f64,
    carrying_logs: u32,
    color: &str,
) -> Loader {
    Loader {
        id: LoaderId::from(id),
        name: name.to_owned(),
        path_id: PathId::from(path_id),
        progress,
        speed,
        status: LoaderStatus::Moving,
        carrying_logs,
        max_load: 10,
        color: color.to_owned(),
        path_sequence: Vec::new(),
        can_access_stem_zone: false,
    }
}

/// The built-in yard: map, fleet, and path-sequence transitions.
#[derive(Debug, Clone)]
pub struct StartingYard {
    /// Zones and paths.
    pub map: YardMap,
    /// Initial loader fleet.
    pub loaders: Vec<Loader>,
    /// Load effects for the stem loader's cycle.
    pub transitions: TransitionTable,
}

/// Create the default starting yard.
///
/// # Errors
///
/// Returns [`WorldError`] if the built-in dataset violates a yard invariant
/// (this would indicate a bug in the dataset itself).
pub fn create_starting_yard() -> Result<StartingYard, WorldError> {
    let zones = ZONES.iter().map(zone).collect();

    let mut paths: Vec<Path> = PATHS.iter().map(path).collect();
    paths.push(stem_loader_path(
        STEM_TO_PRODUCTION_PATH_ID,
        "Stem Zone -> Production (loaded)",
        "stem-zone",
        "production-house",
        WAGNER_STEM_TO_PRODUCTION_ROUTE,
    ));
    paths.push(stem_loader_path(
        PRODUCTION_TO_STEM_PATH_ID,
        "Production -> Stem Zone (empty)",
        "production-house",
        "stem-zone",
        WAGNER_PRODUCTION_TO_STEM_ROUTE,
    ));

    let map = YardMap::new(zones, paths)?;

    let loaders = vec![
        shuttle("loader-1", "Loader Alpha", "path-prod-to-pine-a", 0.0, 0.008, 5, "#fbbf24"),
        shuttle("loader-2", "Loader Beta", "path-pine-a-to-sorting-1", 0.3, 0.007, 8, "#34d399"),
        shuttle("loader-3", "Loader Gamma", "path-sorting-1-to-buffer-1", 0.6, 0.009, 6, "#60a5fa"),
        shuttle("loader-4", "Loader Delta", "path-buffer-1-to-truck-1", 0.1, 0.006, 10, "#f472b6"),
        shuttle("loader-5", "Loader Epsilon", "path-prod-to-eucalyptus", 0.5, 0.008, 7, "#a78bfa"),
        Loader {
            id: LoaderId::from(STEM_LOADER_ID),
            name: "Wagner Stem Loader".to_owned(),
            path_id: PathId::from(STEM_TO_PRODUCTION_PATH_ID),
            progress: 0.0,
            speed: 0.006,
            status: LoaderStatus::Moving,
            carrying_logs: 20,
            max_load: 20,
            color: "#facc15".to_owned(),
            path_sequence: vec![
                PathId::from(STEM_TO_PRODUCTION_PATH_ID),
                PathId::from(PRODUCTION_TO_STEM_PATH_ID),
            ],
            can_access_stem_zone: true,
        },
    ];
    validate_fleet(&loaders)?;

    let transitions = [
        (PathId::from(STEM_TO_PRODUCTION_PATH_ID), TransitionEffect::Fill),
        (PathId::from(PRODUCTION_TO_STEM_PATH_ID), TransitionEffect::Empty),
    ]
    .into_iter()
    .collect();

    Ok(StartingYard {
        map,
        loaders,
        transitions,
    })
}
