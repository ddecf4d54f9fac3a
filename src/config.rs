use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ai::eval::EvalParams;
use crate::ai::weights::{WeightTable, WeightsError};

/// Largest accepted schedule entry.
const MAX_DEPTH: u8 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("failed to read weights file {path}: {source}")]
    WeightsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid weights: {0}")]
    Weights(#[from] WeightsError),
}

/// Engine settings, loadable from TOML. Missing fields keep their
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search depths run in order; the chosen move is rewritten after
    /// each pass, so earlier (shallower) answers survive a cutoff.
    pub depths: Vec<u8>,
    /// Positional weight preset: "corner_heavy" or "balanced".
    pub weight_preset: String,
    /// Binary weights file overriding the preset when set.
    pub weights_file: Option<PathBuf>,
    pub mobility_weight: i32,
    pub stability_bonus: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let params = EvalParams::default();
        Self {
            depths: vec![2, 4],
            weight_preset: "corner_heavy".to_string(),
            weights_file: None,
            mobility_weight: params.mobility_weight,
            stability_bonus: params.stability_bonus,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depths.is_empty() {
            return Err(ConfigError::Validation("depths must not be empty".into()));
        }
        if let Some(&depth) = self.depths.iter().find(|&&d| d > MAX_DEPTH) {
            return Err(ConfigError::Validation(format!(
                "depth {depth} exceeds the maximum of {MAX_DEPTH}"
            )));
        }
        if self.mobility_weight < 0 {
            return Err(ConfigError::Validation(
                "mobility_weight must be >= 0".into(),
            ));
        }
        if self.stability_bonus < 0 {
            return Err(ConfigError::Validation(
                "stability_bonus must be >= 0".into(),
            ));
        }
        if self.weights_file.is_none() {
            WeightTable::from_preset(&self.weight_preset)?;
        }
        Ok(())
    }

    /// Resolves the configured weight source and coefficients into the
    /// evaluator's parameters.
    pub fn eval_params(&self) -> Result<EvalParams, ConfigError> {
        let weights = match &self.weights_file {
            Some(path) => {
                let bytes = fs::read(path).map_err(|e| ConfigError::WeightsRead {
                    path: path.clone(),
                    source: e,
                })?;
                WeightTable::from_bytes(&bytes)?
            }
            None => WeightTable::from_preset(&self.weight_preset)?,
        };

        Ok(EvalParams {
            weights,
            mobility_weight: self.mobility_weight,
            stability_bonus: self.stability_bonus,
        })
    }
}
