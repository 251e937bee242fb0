//! Configuration loading and typed config structures for the Timberyard simulation.
//!
//! The canonical configuration lives in `timberyard-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a default, so an empty file is a valid configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use timberyard_world::{StockDelta, TransitionTable};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but falls outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `timberyard-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Yard-level settings (name, seed).
    #[serde(default)]
    pub yard: YardConfig,

    /// Animation cadence.
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Stock simulator cadence and delta range.
    #[serde(default)]
    pub stock: StockConfig,

    /// Extra path transition effects, merged over the dataset's table.
    #[serde(default)]
    pub transitions: TransitionTable,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check semantic constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animation.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "animation.tick_interval_ms",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.animation.redraw_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "animation.redraw_interval_ms",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.stock.interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "stock.interval_ms",
                reason: "must be at least 1".to_owned(),
            });
        }
        self.stock.delta()?;
        Ok(())
    }
}

/// Yard-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YardConfig {
    /// Human-readable yard name.
    #[serde(default = "default_yard_name")]
    pub name: String,

    /// Random seed for reload sizes and stock deltas.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for YardConfig {
    fn default() -> Self {
        Self {
            name: default_yard_name(),
            seed: default_seed(),
        }
    }
}

/// Animation cadence.
///
/// The redraw signal fires every `redraw_interval_ms`; a tick is applied on
/// a redraw only once `tick_interval_ms` has elapsed since the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AnimationConfig {
    /// Minimum milliseconds between applied loader ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Milliseconds between redraw signals.
    #[serde(default = "default_redraw_interval_ms")]
    pub redraw_interval_ms: u64,
}

impl AnimationConfig {
    /// Minimum time between applied ticks.
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Time between redraw signals.
    pub const fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            redraw_interval_ms: default_redraw_interval_ms(),
        }
    }
}

/// Stock simulator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StockConfig {
    /// Milliseconds between stock cycles.
    #[serde(default = "default_stock_interval_ms")]
    pub interval_ms: u64,

    /// Lowest per-zone delta drawn each cycle.
    #[serde(default = "default_delta_min")]
    pub delta_min: i32,

    /// Highest per-zone delta drawn each cycle.
    #[serde(default = "default_delta_max")]
    pub delta_max: i32,
}

impl StockConfig {
    /// Time between stock cycles.
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// The configured delta range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `delta_min > delta_max`.
    pub fn delta(&self) -> Result<StockDelta, ConfigError> {
        StockDelta::new(self.delta_min, self.delta_max).map_err(|e| ConfigError::Invalid {
            field: "stock.delta_min",
            reason: e.to_string(),
        })
    }
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_stock_interval_ms(),
            delta_min: default_delta_min(),
            delta_max: default_delta_max(),
        }
    }
}

/// Simulation boundary configuration.
///
/// Controls when the engine stops on its own. A value of 0 for either
/// `max_ticks` or `max_real_time_seconds` means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of animation ticks before the run ends (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,

    /// Maximum wall-clock seconds before the run ends (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Subscriber output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Emit a yard status line every N animation ticks (0 = never).
    #[serde(default = "default_status_interval_ticks")]
    pub status_interval_ticks: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            status_interval_ticks: default_status_interval_ticks(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_yard_name() -> String {
    "Rotorua Timber Yard".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    50
}

const fn default_redraw_interval_ms() -> u64 {
    10
}

const fn default_stock_interval_ms() -> u64 {
    3000
}

const fn default_delta_min() -> i32 {
    timberyard_world::stock::DEFAULT_DELTA_MIN
}

const fn default_delta_max() -> i32 {
    timberyard_world::stock::DEFAULT_DELTA_MAX
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_status_interval_ticks() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use timberyard_types::{PathId, TransitionEffect};

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.yard.seed, 42);
        assert_eq!(config.animation.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.animation.redraw_interval(), Duration::from_millis(10));
        assert_eq!(config.stock.interval(), Duration::from_secs(3));
        assert_eq!(config.stock.delta().ok(), Some(StockDelta::default()));
        assert!(config.transitions.is_empty());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
yard:
  name: "Test Yard"
  seed: 123

animation:
  tick_interval_ms: 100
  redraw_interval_ms: 16

stock:
  interval_ms: 1000
  delta_min: -3
  delta_max: 1

transitions:
  path-in: fill
  path-out: empty

simulation:
  max_ticks: 500
  max_real_time_seconds: 60

logging:
  level: "debug"
  format: json
  status_interval_ticks: 20
"#;

        let config = SimulationConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.yard.name, "Test Yard");
        assert_eq!(config.yard.seed, 123);
        assert_eq!(config.animation.tick_interval_ms, 100);
        assert_eq!(config.stock.delta_min, -3);
        assert_eq!(
            config.transitions.effect_for(&PathId::from("path-in")),
            Some(TransitionEffect::Fill)
        );
        assert_eq!(
            config.transitions.effect_for(&PathId::from("path-out")),
            Some(TransitionEffect::Empty)
        );
        assert_eq!(config.simulation.max_ticks, 500);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.status_interval_ticks, 20);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "yard:\n  seed: 7\n";
        let config = SimulationConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        // Seed is overridden
        assert_eq!(config.yard.seed, 7);
        // Everything else uses defaults
        assert_eq!(config.animation.tick_interval_ms, 50);
        assert_eq!(config.stock.interval_ms, 3000);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = SimulationConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let result = SimulationConfig::parse("animation:\n  tick_interval_ms: 0\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "animation.tick_interval_ms",
                ..
            })
        ));

        let result = SimulationConfig::parse("stock:\n  interval_ms: 0\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "stock.interval_ms",
                ..
            })
        ));
    }

    #[test]
    fn inverted_delta_range_is_rejected() {
        let result = SimulationConfig::parse("stock:\n  delta_min: 3\n  delta_max: -3\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn unknown_transition_effect_is_a_yaml_error() {
        let result = SimulationConfig::parse("transitions:\n  path-a: teleport\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("timberyard-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
