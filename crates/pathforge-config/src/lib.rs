//! Configuration system for PathForge.
//!
//! Load planner configuration from TOML or YAML files to pick the planning
//! engine, the default validity policy and post-processing without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use pathforge_config::{EngineType, PlannerConfig};
//! use pathforge_core::DefaultValidity;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     engine = "bidirectional_tree"
//!     default_validity = "reject"
//!     validity_checking_resolution = 0.05
//!     random_seed = 7
//!
//!     [bidirectional_tree]
//!     range_fraction = 0.1
//!
//!     [simplification]
//!     max_shortcut_attempts = 50
//! "#).unwrap();
//!
//! assert_eq!(config.engine, EngineType::BidirectionalTree);
//! assert_eq!(config.default_validity, DefaultValidity::Reject);
//! assert_eq!(config.random_seed, Some(7));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use pathforge_config::PlannerConfig;
//!
//! let config = PlannerConfig::load("pathforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use pathforge_core::DefaultValidity;

/// Resolution used when none is configured: 1% of the space's maximum extent.
pub const DEFAULT_VALIDITY_CHECKING_RESOLUTION: f64 = 0.01;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main planner configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Engine built for every new session.
    #[serde(default)]
    pub engine: EngineType,

    /// Answer given for every configuration while no oracle is installed.
    #[serde(default)]
    pub default_validity: DefaultValidity,

    /// Spacing of motion validity checks, as a fraction of the maximum extent.
    #[serde(default = "default_resolution")]
    pub validity_checking_resolution: f64,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Bidirectional tree engine settings.
    #[serde(default)]
    pub bidirectional_tree: BiTreeConfig,

    /// Path simplification settings.
    #[serde(default)]
    pub simplification: SimplificationConfig,

    /// Path interpolation settings.
    #[serde(default)]
    pub interpolation: InterpolationConfig,
}

fn default_resolution() -> f64 {
    DEFAULT_VALIDITY_CHECKING_RESOLUTION
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            engine: EngineType::default(),
            default_validity: DefaultValidity::default(),
            validity_checking_resolution: DEFAULT_VALIDITY_CHECKING_RESOLUTION,
            random_seed: None,
            bidirectional_tree: BiTreeConfig::default(),
            simplification: SimplificationConfig::default(),
            interpolation: InterpolationConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let resolution = self.validity_checking_resolution;
        if !(0.0..=1.0).contains(&resolution) {
            return Err(ConfigError::Invalid(format!(
                "validity_checking_resolution must be within [0, 1], got {resolution}"
            )));
        }
        let range = self.bidirectional_tree.range_fraction;
        if !(range.is_finite() && range > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bidirectional_tree.range_fraction must be positive, got {range}"
            )));
        }
        Ok(())
    }

    /// Sets the engine type.
    pub fn with_engine(mut self, engine: EngineType) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the policy applied while no oracle is installed.
    pub fn with_default_validity(mut self, default_validity: DefaultValidity) -> Self {
        self.default_validity = default_validity;
        self
    }

    /// Sets the validity checking resolution, clamped to `[0, 1]`.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.validity_checking_resolution = resolution.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables path simplification.
    pub fn with_simplification(mut self, enabled: bool) -> Self {
        self.simplification.enabled = enabled;
        self
    }

    /// Enables or disables path interpolation.
    pub fn with_interpolation(mut self, enabled: bool) -> Self {
        self.interpolation.enabled = enabled;
        self
    }
}

/// Planning engine selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineType {
    /// Straight segment from start to goal, nothing else.
    Direct,

    /// Two randomized trees grown from start and goal until they meet.
    #[default]
    BidirectionalTree,
}

/// Bidirectional tree engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BiTreeConfig {
    /// Longest tree edge, as a fraction of the space's maximum extent.
    #[serde(default = "default_range_fraction")]
    pub range_fraction: f64,

    /// Whether to try the straight start-goal segment before growing trees.
    #[serde(default = "default_true")]
    pub try_direct_connection: bool,
}

fn default_range_fraction() -> f64 {
    0.2
}

fn default_true() -> bool {
    true
}

impl Default for BiTreeConfig {
    fn default() -> Self {
        Self {
            range_fraction: default_range_fraction(),
            try_direct_connection: true,
        }
    }
}

/// Path simplification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimplificationConfig {
    /// Whether solved paths are simplified.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of random shortcut attempts per simplification.
    #[serde(default = "default_shortcut_attempts")]
    pub max_shortcut_attempts: usize,
}

fn default_shortcut_attempts() -> usize {
    100
}

impl Default for SimplificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_shortcut_attempts: default_shortcut_attempts(),
        }
    }
}

/// Path interpolation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InterpolationConfig {
    /// Whether solved paths are densified to the validity checking resolution.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
