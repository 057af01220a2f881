//! Interpreter configuration, persisted as TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// How `unify` and knowledge-base lookup match atoms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnifyMode {
    /// Head-only matching: expressions match when their heads are equal,
    /// variables bind only at the top level.
    #[default]
    Shallow,
    /// Full first-order unification with occurs-check.
    Strict,
}

impl std::fmt::Display for UnifyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnifyMode::Shallow => write!(f, "shallow"),
            UnifyMode::Strict => write!(f, "strict"),
        }
    }
}

/// Configuration for an [`Interpreter`](crate::interp::Interpreter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Maximum nesting of `chain` reductions per top-level call.
    #[serde(default = "default_max_chain_depth")]
    pub max_chain_depth: usize,
    /// Matching discipline for `unify` and rule lookup.
    #[serde(default)]
    pub unify_mode: UnifyMode,
}

fn default_max_chain_depth() -> usize {
    100
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: default_max_chain_depth(),
            unify_mode: UnifyMode::default(),
        }
    }
}

impl InterpreterConfig {
    /// Default configuration in strict mode.
    pub fn strict() -> Self {
        Self {
            unify_mode: UnifyMode::Strict,
            ..Default::default()
        }
    }

    /// Reject configurations the interpreter cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_chain_depth == 0 {
            return Err(ConfigError::Invalid {
                message: "max_chain_depth must be > 0".into(),
            });
        }
        Ok(())
    }

    /// Parse from TOML text and validate.
    pub fn from_toml(content: &str, origin: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
