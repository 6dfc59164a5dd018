//! Configuration file support for Repwise.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/repwise/config.toml`.
//! Scoring weights and suggestion thresholds are policy knobs, not
//! physiological constants; the defaults here are a starting
//! configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub recovery: RecoveryConfig,

    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Recovery score weights and recency curve parameters.
///
/// Weights are renormalized at use, so they only need to be positive.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecoveryConfig {
    #[serde(default = "default_sleep_weight")]
    pub sleep_weight: f64,

    #[serde(default = "default_protein_weight")]
    pub protein_weight: f64,

    #[serde(default = "default_recency_weight")]
    pub recency_weight: f64,

    /// Inclusive bounds of the optimal rest window, in days since the
    /// last workout
    #[serde(default = "default_optimal_rest_min")]
    pub optimal_rest_min_days: i64,

    #[serde(default = "default_optimal_rest_max")]
    pub optimal_rest_max_days: i64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            sleep_weight: default_sleep_weight(),
            protein_weight: default_protein_weight(),
            recency_weight: default_recency_weight(),
            optimal_rest_min_days: default_optimal_rest_min(),
            optimal_rest_max_days: default_optimal_rest_max(),
        }
    }
}

/// Thresholds used by the suggestion rule set
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Recovery score below this fires a rest-day suggestion
    #[serde(default = "default_low_recovery")]
    pub low_recovery_threshold: f64,

    /// Recovery score at or above this allows a progression nudge
    #[serde(default = "default_high_recovery")]
    pub high_recovery_threshold: f64,

    /// Consecutive days under protein target before the nutrition rule fires
    #[serde(default = "default_protein_shortfall_days")]
    pub protein_shortfall_days: usize,

    /// Fraction of the calorie target counted as adequate intake
    #[serde(default = "default_calorie_adequacy_ratio")]
    pub calorie_adequacy_ratio: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            low_recovery_threshold: default_low_recovery(),
            high_recovery_threshold: default_high_recovery(),
            protein_shortfall_days: default_protein_shortfall_days(),
            calorie_adequacy_ratio: default_calorie_adequacy_ratio(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("repwise")
}

fn default_sleep_weight() -> f64 {
    0.4
}

fn default_protein_weight() -> f64 {
    0.3
}

fn default_recency_weight() -> f64 {
    0.3
}

fn default_optimal_rest_min() -> i64 {
    1
}

fn default_optimal_rest_max() -> i64 {
    2
}

fn default_low_recovery() -> f64 {
    40.0
}

fn default_high_recovery() -> f64 {
    80.0
}

fn default_protein_shortfall_days() -> usize {
    3
}

fn default_calorie_adequacy_ratio() -> f64 {
    0.8
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("repwise").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let r = &self.recovery;
        if r.sleep_weight < 0.0 || r.protein_weight < 0.0 || r.recency_weight < 0.0 {
            return Err(Error::Config("recovery weights must be non-negative".into()));
        }
        if r.sleep_weight + r.protein_weight + r.recency_weight <= 0.0 {
            return Err(Error::Config("recovery weights must not all be zero".into()));
        }
        if r.optimal_rest_min_days < 0 || r.optimal_rest_max_days < r.optimal_rest_min_days {
            return Err(Error::Config("invalid optimal rest window".into()));
        }
        Ok(())
    }
}
