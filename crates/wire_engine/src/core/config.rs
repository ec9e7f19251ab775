//! # Unified Configuration
//!
//! Consolidates the settings of every subsystem into one serializable
//! structure. Each section has defaults, so a file only needs to name the
//! values it changes.

use serde::{Serialize, Deserialize};

use crate::foundation::logging::{self, LevelFilter};
use crate::navigation::PathfinderConfig;

// Re-export from the config module for convenience
pub use crate::config::{Config, ConfigError, ConfigFormat};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level (`RUST_LOG` overrides it)
    pub level: String,
}

impl LoggingConfig {
    /// Parsed level filter
    pub fn level_filter(&self) -> LevelFilter {
        logging::parse_level(&self.level)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Physics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Length used for direction rays cast without an explicit distance
    pub default_ray_distance: f64,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self { default_ray_distance: 1000.0 }
    }
}

/// # Engine Configuration
///
/// Top-level configuration loaded by applications at startup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Collision and raycast settings
    pub physics: PhysicsSettings,
    /// Pathfinding settings
    pub navigation: PathfinderConfig,
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Initialize logging from this configuration
    ///
    /// Returns false if a logger was already installed.
    pub fn init_logging(&self) -> bool {
        logging::init_with_level(self.logging.level_filter())
    }
}
