//! Top-level Fovea configuration with 4-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnnotatorConfig, StorageConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_cli_overrides`)
/// 2. Environment variables (`FOVEA_*`)
/// 3. Project config (`fovea.toml` in project root)
/// 4. User config (`~/.fovea/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FoveaConfig {
    pub storage: StorageConfig,
    pub annotator: AnnotatorConfig,
}

/// Override arguments that can be applied on top of the file layers.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<String>,
    pub read_pool_size: Option<usize>,
    pub skip_probability: Option<f64>,
    pub seed: Option<u64>,
}

impl FoveaConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(_) => {
                        // Non-parse errors from user config are warnings, not fatal.
                        // Continue with defaults.
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("fovea.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            tracing::debug!(path = %project_config_path.display(), "merged project config");
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): programmatic overrides
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        // Validate the final config
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &FoveaConfig) -> Result<(), ConfigError> {
        if let Some(p) = config.annotator.skip_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::ValidationFailed {
                    field: "annotator.skip_probability".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(size) = config.storage.read_pool_size {
            if size == 0 || size > 8 {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.read_pool_size".to_string(),
                    message: "must be between 1 and 8".to_string(),
                });
            }
        }
        if let Some(ref path) = config.storage.db_path {
            if path.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.db_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.fovea/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut FoveaConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FoveaConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut FoveaConfig, other: &FoveaConfig) {
        // Storage
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }

        // Annotator
        if other.annotator.skip_probability.is_some() {
            base.annotator.skip_probability = other.annotator.skip_probability;
        }
        if other.annotator.seed.is_some() {
            base.annotator.seed = other.annotator.seed;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `FOVEA_STORAGE_DB_PATH`, `FOVEA_ANNOTATOR_SKIP_PROBABILITY`, etc.
    fn apply_env_overrides(config: &mut FoveaConfig) {
        if let Ok(val) = std::env::var("FOVEA_STORAGE_DB_PATH") {
            if !val.is_empty() {
                config.storage.db_path = Some(val);
            }
        }
        if let Ok(val) = std::env::var("FOVEA_STORAGE_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FOVEA_ANNOTATOR_SKIP_PROBABILITY") {
            if let Ok(v) = val.parse::<f64>() {
                config.annotator.skip_probability = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FOVEA_ANNOTATOR_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                config.annotator.seed = Some(v);
            }
        }
    }

    /// Apply programmatic overrides (highest priority).
    fn apply_cli_overrides(config: &mut FoveaConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = Some(v.clone());
        }
        if let Some(v) = cli.read_pool_size {
            config.storage.read_pool_size = Some(v);
        }
        if let Some(v) = cli.skip_probability {
            config.annotator.skip_probability = Some(v);
        }
        if let Some(v) = cli.seed {
            config.annotator.seed = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level fovea config directory: `~/.fovea/`.
fn dirs_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".fovea"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
