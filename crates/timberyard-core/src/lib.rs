//! Loader state machine, tick scheduling, and orchestration for the Timberyard simulation.
//!
//! This crate owns everything that moves: the per-loader transition
//! function, the per-tick orchestration over the whole yard, and the two
//! timers that drive it.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `timberyard-config.yaml` into
//!   strongly-typed structs.
//! - [`frame_gate`] -- Frame-budget gate over the redraw signal.
//! - [`loader`] -- The pure loader state machine.
//! - [`operator`] -- Shared stop flag and run bounds.
//! - [`runner`] -- Bounded run loop around the scheduler.
//! - [`scheduler`] -- [`YardScheduler`]: animation and stock tasks with
//!   pause, resume and teardown.
//! - [`tick`] -- [`YardState`], the animation tick and the stock cycle.
//!
//! [`YardScheduler`]: scheduler::YardScheduler
//! [`YardState`]: tick::YardState

pub mod config;
pub mod frame_gate;
pub mod loader;
pub mod operator;
pub mod runner;
pub mod scheduler;
pub mod tick;
