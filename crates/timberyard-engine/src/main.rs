//! Yard engine binary for the Timberyard simulation.
//!
//! This is the main entry point that wires together the starting yard, the
//! scheduler and the operator controls. It loads configuration, builds the
//! yard, and runs both timers until a bound is reached or Ctrl-C is pressed.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `timberyard-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Create the starting yard (15 zones, 18 paths, 6 loaders)
//! 4. Merge configured transition effects over the dataset's table
//! 5. Create the scheduler and operator state
//! 6. Install the Ctrl-C handler
//! 7. Run until done, then log the result

mod error;
mod status_callback;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use timberyard_core::config::{LogFormat, LoggingConfig, SimulationConfig};
use timberyard_core::operator::OperatorState;
use timberyard_core::runner;
use timberyard_core::scheduler::{SchedulerConfig, YardScheduler};
use timberyard_core::tick::YardState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::status_callback::StatusCallback;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "timberyard-config.yaml";

/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "TIMBERYARD_CONFIG";

/// Application entry point for the yard engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the run itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("timberyard-engine starting");
    if !config_found {
        info!("Config file not found, using defaults");
    }
    info!(
        yard_name = config.yard.name,
        seed = config.yard.seed,
        tick_interval_ms = config.animation.tick_interval_ms,
        stock_interval_ms = config.stock.interval_ms,
        "Configuration loaded"
    );

    // 3. Create the starting yard.
    let mut yard = timberyard_world::create_starting_yard().map_err(EngineError::from)?;
    info!(
        zones = yard.map.zone_count(),
        paths = yard.map.path_count(),
        loaders = yard.loaders.len(),
        "Starting yard created"
    );

    // 4. Merge configured transitions.
    if !config.transitions.is_empty() {
        for (path, _) in config.transitions.iter() {
            if yard.map.path(path).is_none() {
                warn!(path = %path, "Transition configured for an unknown path");
            }
        }
        yard.transitions.merge(&config.transitions);
        info!(
            entries = yard.transitions.len(),
            "Transition table merged with configuration"
        );
    }

    // 5. Create scheduler and operator state.
    let stock_delta = config.stock.delta().map_err(EngineError::from)?;
    let state = YardState::new(
        yard.map,
        yard.loaders,
        yard.transitions,
        stock_delta,
        config.yard.seed,
    )
    .map_err(EngineError::from)?;
    let mut scheduler = YardScheduler::new(state, SchedulerConfig::from_config(&config));

    let operator = Arc::new(OperatorState::new(&config.simulation));
    info!(
        max_ticks = operator.max_ticks(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        "Operator state initialized"
    );

    // 6. Stop cleanly on Ctrl-C.
    {
        let operator = Arc::clone(&operator);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutdown signal received");
                    operator.request_stop();
                }
                Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
            }
        });
    }

    // 7. Run.
    let mut callback = StatusCallback::new(config.logging.status_interval_ticks);
    let result = runner::run_until_done(&mut scheduler, &operator, &mut callback)
        .await
        .map_err(EngineError::from)?;

    runner::log_run_end(&result);
    scheduler.shutdown().await.map_err(EngineError::from)?;

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "timberyard-engine shutdown complete"
    );

    Ok(())
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

/// Resolve the configuration path from the environment or the default.
fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load the simulation configuration.
///
/// Returns the configuration and whether a file was found. A missing file
/// falls back to defaults; a malformed one is an error.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let path = config_path();
    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<(SimulationConfig, bool), EngineError> {
    if path.exists() {
        let config = SimulationConfig::from_file(path)?;
        Ok((config, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let result = load_config_from(Path::new("definitely/not/here.yaml"));
        assert!(matches!(result, Ok((_, false))));
    }

    #[test]
    fn project_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(DEFAULT_CONFIG_PATH);
        if path.exists() {
            let result = load_config_from(&path);
            assert!(matches!(result, Ok((_, true))), "{result:?}");
        }
    }
}
