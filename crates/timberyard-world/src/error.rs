//! Error types for the `timberyard-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`].

use timberyard_types::{LoaderId, PathId, ZoneId};

/// Errors that can occur while building or mutating the yard.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A zone was not found in the yard.
    #[error("zone not found: {0}")]
    ZoneNotFound(ZoneId),

    /// The zone is locked and its stock cannot change.
    #[error("zone {0} is locked")]
    ZoneLocked(ZoneId),

    /// A duplicate zone was inserted where uniqueness is required.
    #[error("duplicate zone id: {0}")]
    DuplicateZone(ZoneId),

    /// A duplicate path was inserted where uniqueness is required.
    #[error("duplicate path id: {0}")]
    DuplicatePath(PathId),

    /// A duplicate loader was inserted where uniqueness is required.
    #[error("duplicate loader id: {0}")]
    DuplicateLoader(LoaderId),

    /// A zone's initial stock is above its capacity.
    #[error("zone {zone} holds {stock} logs but only has room for {capacity}")]
    StockExceedsCapacity {
        /// The offending zone.
        zone: ZoneId,
        /// Declared stock.
        stock: u32,
        /// Declared capacity.
        capacity: u32,
    },

    /// A path has fewer than two points.
    #[error("path {path} has {points} point(s), at least 2 are required")]
    DegeneratePath {
        /// The offending path.
        path: PathId,
        /// Number of points it declares.
        points: usize,
    },

    /// A loader definition violates a numeric precondition.
    #[error("invalid loader {loader}: {reason}")]
    InvalidLoader {
        /// The offending loader.
        loader: LoaderId,
        /// Explanation of what is wrong.
        reason: String,
    },

    /// The stock delta range is empty.
    #[error("invalid stock delta range: {min}..={max}")]
    InvalidStockDelta {
        /// Lower bound.
        min: i32,
        /// Upper bound.
        max: i32,
    },
}
