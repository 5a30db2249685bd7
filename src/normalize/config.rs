// Configuration for history normalization and aggregation
//
// The cutoff, the objective sense and the suppression window encode domain
// assumptions (minimization, visual start-up noise) rather than universal
// truths, so they are configuration instead of literals.

use crate::error::{CompareError, HistoryKind, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Direction of the optimization objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveSense {
    /// Smaller objective values are better (default)
    #[default]
    Minimize,
    /// Larger objective values are better
    Maximize,
}

impl ObjectiveSense {
    /// The better of two objective values
    pub fn best(self, x: f64, y: f64) -> f64 {
        match self {
            ObjectiveSense::Minimize => x.min(y),
            ObjectiveSense::Maximize => x.max(y),
        }
    }

    /// The worse of two values of the given history kind
    ///
    /// Bounds move in the opposite direction of objectives: under
    /// minimization a lower bound grows while the objective shrinks.
    pub fn worst(self, kind: HistoryKind, x: f64, y: f64) -> f64 {
        match (self, kind) {
            (ObjectiveSense::Minimize, HistoryKind::Objective)
            | (ObjectiveSense::Maximize, HistoryKind::LowerBound) => x.max(y),
            (ObjectiveSense::Minimize, HistoryKind::LowerBound)
            | (ObjectiveSense::Maximize, HistoryKind::Objective) => x.min(y),
        }
    }
}

/// Configuration for a comparison run
///
/// # Example
/// ```
/// use cotejo::normalize::CompareConfig;
///
/// let config = CompareConfig::default();
/// assert_eq!(config.min_time_cutoff, 1.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Warm-up time in seconds; history before it collapses into one point
    ///
    /// 0 disables trimming.
    pub min_time_cutoff: f64,

    /// Objective direction used for best-value resolution
    pub objective_sense: ObjectiveSense,

    /// Aggregate points before this time (seconds) are computed but not emitted
    pub suppression_window: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            min_time_cutoff: 1.0,
            objective_sense: ObjectiveSense::Minimize,
            suppression_window: 1.0,
        }
    }
}

impl CompareConfig {
    /// Parse a configuration from TOML text; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CompareConfig =
            toml::from_str(text).map_err(|e| CompareError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let text = std::fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read config file {}", path_ref.display()))?;
        Ok(Self::from_toml_str(&text)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.min_time_cutoff.is_finite() || self.min_time_cutoff < 0.0 {
            return Err(CompareError::InvalidConfig(format!(
                "min_time_cutoff must be a non-negative number, got {}",
                self.min_time_cutoff
            )));
        }

        if !self.suppression_window.is_finite() || self.suppression_window < 0.0 {
            return Err(CompareError::InvalidConfig(format!(
                "suppression_window must be a non-negative number, got {}",
                self.suppression_window
            )));
        }

        Ok(())
    }
}
