//! Shared type definitions for the Timberyard simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Timberyard workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the map renderer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for zone, path and loader ids
//! - [`enums`] -- Zone categories, loader status, capacity tiers, transition effects
//! - [`structs`] -- Core entities (zones, paths, loaders) and [`GeoPoint`]
//! - [`snapshot`] -- Render snapshots consumed by the presentation layer
//!
//! [`GeoPoint`]: structs::GeoPoint

pub mod enums;
pub mod ids;
pub mod snapshot;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{CapacityTier, LoaderStatus, TransitionEffect, ZoneType};
pub use ids::{LoaderId, PathId, ZoneId};
pub use snapshot::{DisplayOptions, LoaderView, YardSnapshot, YardStats, ZoneView};
pub use structs::{GeoPoint, Loader, Path, Zone};
