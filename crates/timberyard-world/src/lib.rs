//! Yard geometry, zone stock, and the starting yard for the Timberyard simulation.
//!
//! This crate models the static side of the yard: zones and one-way paths,
//! the planar geometry that places loaders on those paths, fill-level
//! mapping, and the randomized stock simulator.
//!
//! # Modules
//!
//! - [`capacity`] -- Fill percentage and capacity tier/color mapping.
//! - [`error`] -- Error types for yard operations.
//! - [`fleet`] -- Boundary validation of loader definitions.
//! - [`geometry`] -- Interpolation along polylines by arc length.
//! - [`starting_yard`] -- The built-in Rotorua yard dataset.
//! - [`stock`] -- Per-cycle stock perturbation and the shared clamping rule.
//! - [`transitions`] -- Path-sequence load effects for cyclic loaders.
//! - [`yard_map`] -- [`YardMap`]: zone and path registry, manual stock
//!   adjustment, render views and aggregate statistics.

pub mod capacity;
pub mod error;
pub mod fleet;
pub mod geometry;
pub mod starting_yard;
pub mod stock;
pub mod transitions;
pub mod yard_map;

// Re-export primary types at crate root.
pub use capacity::{capacity_color, capacity_pct, capacity_tier};
pub use error::WorldError;
pub use fleet::validate_fleet;
pub use geometry::{PathLocation, interpolate_along_path, locate_along_path, path_length};
pub use starting_yard::{StartingYard, create_starting_yard};
pub use stock::{StockChange, StockDelta, clamp_stock, simulate_stock_cycle};
pub use transitions::TransitionTable;
pub use yard_map::YardMap;
