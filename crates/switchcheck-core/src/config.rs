//! Configuration file loading for switchcheck.
//!
//! Reads `switchcheck.json` from the analysed root. Falls back to defaults
//! when the file is missing or incomplete.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "switchcheck.json";

/// Top-level switchcheck configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchCheckConfig {
    /// Reserved: insert missing cases. Accepted but has no effect yet.
    #[serde(default)]
    pub fill: bool,
    /// Match `-exclude` names by equality instead of substring.
    #[serde(default)]
    pub exact_exclude: bool,
    /// Also analyse `_test.go` files.
    #[serde(default)]
    pub include_tests: bool,
    /// Glob patterns (relative to the root) of files to skip.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl SwitchCheckConfig {
    /// Read `switchcheck.json` under `root`. `Ok(None)` when there is no file.
    pub fn try_load(root: &Path) -> Result<Option<Self>, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path, source })
    }

    /// Load configuration, returning defaults if the file doesn't exist or
    /// can't be parsed.
    pub fn load(root: &Path) -> Self {
        match Self::try_load(root) {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }
}
