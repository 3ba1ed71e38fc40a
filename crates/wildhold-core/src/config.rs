//! Configuration loading and typed config structures for the Wildhold
//! world server.
//!
//! The canonical configuration lives in `wildhold-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a default, so a missing file or an empty document yields
//! a runnable server.

use std::path::Path;

use serde::Deserialize;
use wildhold_types::Bounds;

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

    /// A value parsed but cannot be used.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
///
/// Mirrors the structure of `wildhold-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Listening address.
    #[serde(default)]
    pub server: NetworkConfig,

    /// World size and seeding.
    #[serde(default)]
    pub world: WorldConfig,

    /// Gameplay tuning.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Timer periods and timeouts.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the listen address:
    /// - `HOST` overrides `server.host`
    /// - `PORT` overrides `server.port`
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

    /// Parse configuration from a YAML string, applying environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse_with(yaml, |key| std::env::var(key).ok())
    }

    /// Defaults with environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if an override cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.server.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration, resolving overrides through `lookup` instead of
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`GameConfig::parse`].
    pub fn parse_with(
        yaml: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| {
            Err(ConfigError::Invalid {
                reason: reason.to_owned(),
            })
        };
        if !(self.world.width.is_finite() && self.world.width > 0.0) {
            return invalid("world.width must be a positive number");
        }
        if !(self.world.height.is_finite() && self.world.height > 0.0) {
            return invalid("world.height must be a positive number");
        }
        if !(self.rules.player_speed.is_finite() && self.rules.player_speed > 0.0) {
            return invalid("rules.player_speed must be a positive number");
        }
        if !(self.rules.action_range.is_finite() && self.rules.action_range > 0.0) {
            return invalid("rules.action_range must be a positive number");
        }
        if self.timing.snapshot_hz == 0 {
            return invalid("timing.snapshot_hz must be at least 1");
        }
        if self.timing.maintenance_interval_ms == 0 {
            return invalid("timing.maintenance_interval_ms must be at least 1");
        }
        Ok(())
    }
}

/// Listening address for the WebSocket server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl NetworkConfig {
    /// Override the listen address with `HOST` / `PORT` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `PORT` is not a valid port.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("HOST") {
            self.host = val;
        }
        if let Some(val) = lookup("PORT") {
            self.port = val.trim().parse().map_err(|e| ConfigError::Invalid {
                reason: format!("PORT={val:?} is not a valid port: {e}"),
            })?;
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// World size and seeding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// World width in units.
    #[serde(default = "default_world_width")]
    pub width: f64,

    /// World height in units.
    #[serde(default = "default_world_height")]
    pub height: f64,

    /// Number of resource nodes seeded at startup.
    #[serde(default = "default_node_count")]
    pub node_count: u32,

    /// Random seed for reproducible worlds. Entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl WorldConfig {
    /// The world rectangle.
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_world_width(),
            height: default_world_height(),
            node_count: default_node_count(),
            seed: None,
        }
    }
}

/// Gameplay tuning read by the action resolver.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RulesConfig {
    /// Player movement speed in units per second.
    #[serde(default = "default_player_speed")]
    pub player_speed: f64,

    /// Maximum actor-to-target distance for building and harvesting.
    #[serde(default = "default_action_range")]
    pub action_range: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            player_speed: default_player_speed(),
            action_range: default_action_range(),
        }
    }
}

/// Timer periods and timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimingConfig {
    /// Full snapshots broadcast per second.
    #[serde(default = "default_snapshot_hz")]
    pub snapshot_hz: u32,

    /// Period of the respawn and idle sweep, in milliseconds.
    #[serde(default = "default_maintenance_interval_ms")]
    pub maintenance_interval_ms: u64,

    /// Seconds without any message before a player is removed.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl TimingConfig {
    /// Milliseconds between snapshot broadcasts.
    pub fn snapshot_period_ms(&self) -> u64 {
        1000_u64.checked_div(u64::from(self.snapshot_hz)).unwrap_or(1000).max(1)
    }

    /// Idle timeout in milliseconds.
    pub fn idle_timeout_ms(&self) -> i64 {
        i64::try_from(self.idle_timeout_secs.saturating_mul(1000)).unwrap_or(i64::MAX)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            snapshot_hz: default_snapshot_hz(),
            maintenance_interval_ms: default_maintenance_interval_ms(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when
    /// set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3000
}

const fn default_world_width() -> f64 {
    2000.0
}

const fn default_world_height() -> f64 {
    2000.0
}

const fn default_node_count() -> u32 {
    40
}

const fn default_player_speed() -> f64 {
    220.0
}

const fn default_action_range() -> f64 {
    80.0
}

const fn default_snapshot_hz() -> u32 {
    20
}

const fn default_maintenance_interval_ms() -> u64 {
    1000
}

const fn default_idle_timeout_secs() -> u64 {
    600
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.world.width, 2000.0);
        assert_eq!(config.rules.player_speed, 220.0);
        assert_eq!(config.rules.action_range, 80.0);
        assert_eq!(config.timing.snapshot_hz, 20);
        assert_eq!(config.timing.snapshot_period_ms(), 50);
        assert_eq!(config.timing.idle_timeout_ms(), 600_000);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 9000

world:
  width: 800
  height: 600
  node_count: 12
  seed: 99

rules:
  player_speed: 150
  action_range: 64

timing:
  snapshot_hz: 10
  maintenance_interval_ms: 500
  idle_timeout_secs: 30

logging:
  level: "debug"
  json: true
"#;

        let config = GameConfig::parse_with(yaml, no_env);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.world.bounds(), Bounds::new(800.0, 600.0));
        assert_eq!(config.world.node_count, 12);
        assert_eq!(config.world.seed, Some(99));
        assert_eq!(config.rules.player_speed, 150.0);
        assert_eq!(config.timing.snapshot_period_ms(), 100);
        assert_eq!(config.timing.idle_timeout_ms(), 30_000);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = GameConfig::parse_with("world:\n  seed: 7\n", no_env);
        let config = config.ok().unwrap_or_default();

        // Seed is overridden
        assert_eq!(config.world.seed, Some(7));
        // Everything else uses defaults
        assert_eq!(config.world.node_count, 40);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = GameConfig::parse_with("", no_env);
        assert_eq!(config.ok(), Some(GameConfig::default()));
    }

    #[test]
    fn env_overrides_listen_address() {
        let lookup = |key: &str| match key {
            "PORT" => Some("4100".to_owned()),
            "HOST" => Some("10.0.0.2".to_owned()),
            _ => None,
        };
        let config = GameConfig::parse_with("server:\n  port: 9000\n", lookup)
            .ok()
            .unwrap_or_default();
        assert_eq!(config.server.port, 4100);
        assert_eq!(config.server.host, "10.0.0.2");
    }

    #[test]
    fn bad_port_override_is_error() {
        let lookup = |key: &str| (key == "PORT").then(|| "http".to_owned());
        let result = GameConfig::parse_with("", lookup);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn zero_snapshot_rate_rejected() {
        let result = GameConfig::parse_with("timing:\n  snapshot_hz: 0\n", no_env);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn negative_world_rejected() {
        let result = GameConfig::parse_with("world:\n  width: -5\n", no_env);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn malformed_yaml_is_error() {
        let result = GameConfig::parse_with("world: [unclosed", no_env);
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("wildhold-config.yaml");
        let config = GameConfig::from_file(&path);
        assert!(config.is_ok(), "project config should load: {config:?}");
    }
}
