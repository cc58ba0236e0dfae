use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use toolver_backend::VersionOrdering;
use toolver_platform::AppPaths;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not encode settings: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Could not write settings: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Overrides `<data_dir>/plugins`.
    #[serde(default)]
    pub plugins_dir: Option<PathBuf>,

    /// Moves state, log, plugins, installs and shims.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub version_ordering: VersionOrdering,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plugins_dir: None,
            data_dir: None,
            version_ordering: VersionOrdering::default(),
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl Settings {
    /// Settings at `path`; a missing or unreadable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|error| {
                eprintln!(
                    "toolver: ignoring malformed settings {}: {error}",
                    path.display()
                );
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `paths` with the configured data directory applied.
    #[must_use]
    pub fn apply_to(&self, paths: AppPaths) -> AppPaths {
        match &self.data_dir {
            Some(dir) => paths.with_data_dir(dir),
            None => paths,
        }
    }

    #[must_use]
    pub fn plugins_dir(&self, paths: &AppPaths) -> PathBuf {
        self.plugins_dir
            .clone()
            .unwrap_or_else(|| paths.plugins_dir())
    }
}
