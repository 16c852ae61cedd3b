//! Configuration file loading for the coach.
//!
//! Settings come from `coach.toml` in the current directory, or from the
//! file named with `--config`. Command-line flags override both.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use chess_analysis::DEFAULT_ANALYSIS_DEPTH;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is outside its allowed range.
    #[error("invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Move selection settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on the search depth used by the skill modulator.
    pub max_depth: u8,
    /// Skill level used when `--skill` is not given.
    pub default_skill: i64,
    /// Seed for the move randomizer. Absent means seed from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            default_skill: 10,
            seed: None,
        }
    }
}

/// Game review settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisSection {
    /// Search depth for every analyzed position.
    pub depth: u8,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            depth: DEFAULT_ANALYSIS_DEPTH,
        }
    }
}

/// Top-level coach configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct CoachConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub analysis: AnalysisSection,
}

impl CoachConfig {
    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`Self::default_path()`] is tried and a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid TOML and
    /// [`ConfigError::Invalid`] if a depth is zero.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// `coach.toml` in the current working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("coach.toml")
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.max_depth == 0 {
            return Err(ConfigError::Invalid {
                key: "engine.max_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.analysis.depth == 0 {
            return Err(ConfigError::Invalid {
                key: "analysis.depth",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
