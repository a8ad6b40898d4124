use crate::error::ConfigError;
use crate::options::{AddPosition, OccurrencePolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default preview format: "annotated", "table", "summary", "json" or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,

    #[serde(default)]
    pub occurrence: OccurrencePolicy,

    #[serde(default)]
    pub add_position: AddPosition,

    /// Treat removal patterns as regular expressions
    #[serde(default)]
    pub use_regex: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            use_color: None,
            occurrence: OccurrencePolicy::default(),
            add_position: AddPosition::default(),
            use_regex: false,
        }
    }
}

fn default_preview() -> String {
    "annotated".to_string()
}

impl Config {
    /// Path of the project-local config, `.renbatch/config.toml` under `dir`
    pub fn local_path(dir: &Path) -> PathBuf {
        dir.join(".renbatch").join("config.toml")
    }

    /// Load the local config if present, else the global one, else defaults.
    /// The local file replaces the global one entirely.
    pub fn load_layered(global: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(cwd) = std::env::current_dir() {
            let local = Self::local_path(&cwd);
            if local.exists() {
                return Self::load_from_path(&local);
            }
        }

        match global {
            Some(path) if path.exists() => Self::load_from_path(path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
