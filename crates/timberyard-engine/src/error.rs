//! Error types for the yard engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and the run.

/// Top-level error for the yard engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: timberyard_core::config::ConfigError,
    },

    /// Yard construction failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: timberyard_world::WorldError,
    },

    /// The run loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: timberyard_core::runner::RunnerError,
    },

    /// The scheduler failed during teardown.
    #[error("scheduler error: {source}")]
    Scheduler {
        /// The underlying scheduler error.
        #[from]
        source: timberyard_core::scheduler::SchedulerError,
    },
}
