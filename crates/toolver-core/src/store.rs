use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use toolver_backend::Tool;

use crate::error::StoreError;
use crate::fs::write_atomic;

/// Declared-state operations the dispatcher needs.
///
/// `is_installed` answers from the in-memory working copy only; the two
/// `record_*` calls persist the whole store before returning.
pub trait StateStore {
    fn is_installed(&self, tool: &str, version: &str) -> bool;

    /// Declare `version` of `tool` as installed at `path`. Recording a
    /// version that is already declared keeps the existing entry.
    fn record_installed(
        &mut self,
        tool: &str,
        version: &str,
        path: &Path,
    ) -> Result<(), StoreError>;

    fn record_uninstalled(&mut self, tool: &str, version: &str) -> Result<(), StoreError>;

    /// Every declared version of `tool`, in [`Tool`] order.
    fn installed_versions(&self, tool: &str) -> Vec<Tool>;

    /// Names of every tool with a record, sorted.
    fn tool_names(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub version: String,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<String>,
    #[serde(default)]
    pub versions: Vec<VersionRecord>,
}

impl ToolRecord {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            global: None,
            versions: Vec::new(),
        }
    }

    fn contains(&self, version: &str) -> bool {
        self.versions.iter().any(|record| record.version == version)
    }

    fn dedup_versions(&mut self) -> usize {
        let before = self.versions.len();
        let mut seen = std::collections::HashSet::new();
        self.versions
            .retain(|record| seen.insert(record.version.clone()));
        before - self.versions.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredState {
    #[serde(default)]
    pub tools: BTreeMap<String, ToolRecord>,
}

/// JSON-backed [`StateStore`], loaded once and rewritten in full after every
/// mutation.
#[derive(Debug)]
pub struct DeclaredStore {
    path: PathBuf,
    state: DeclaredState,
}

impl DeclaredStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    /// Fails when the file exists but cannot be read or decoded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(data) => {
                serde_json::from_str(&data).map_err(|error| StoreError::Malformed {
                    path: path.clone(),
                    message: error.to_string(),
                })?
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No declared state at {}, starting empty", path.display());
                DeclaredState::default()
            }
            Err(error) => return Err(error.into()),
        };

        let mut store = Self { path, state };
        store.normalize();
        Ok(store)
    }

    /// Like [`DeclaredStore::open`], but an unreadable or malformed file is
    /// logged and treated as empty. The next mutation overwrites it.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(error) => {
                log::error!("Failed to load declared state, continuing with an empty store: {error}");
                Self {
                    path,
                    state: DeclaredState::default(),
                }
            }
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn state(&self) -> &DeclaredState {
        &self.state
    }

    #[must_use]
    pub fn global_version(&self, tool: &str) -> Option<&str> {
        self.state.tools.get(tool)?.global.as_deref()
    }

    /// Write the whole store to disk.
    ///
    /// # Errors
    /// Fails when the state cannot be encoded or written.
    pub fn save(&self) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(&self.state).map_err(|error| StoreError::Encode {
            message: error.to_string(),
        })?;
        write_atomic(&self.path, &data)?;
        log::trace!("Declared state written to {}", self.path.display());
        Ok(())
    }

    fn normalize(&mut self) {
        for (key, record) in &mut self.state.tools {
            if record.name != *key {
                log::warn!(
                    "Tool record {key} carries name {}, using the key",
                    record.name
                );
                record.name.clone_from(key);
            }
            let dropped = record.dedup_versions();
            if dropped > 0 {
                log::warn!("Dropped {dropped} duplicate version entries for {key}");
            }
        }
    }
}

impl StateStore for DeclaredStore {
    fn is_installed(&self, tool: &str, version: &str) -> bool {
        self.state
            .tools
            .get(tool)
            .is_some_and(|record| record.contains(version))
    }

    fn record_installed(
        &mut self,
        tool: &str,
        version: &str,
        path: &Path,
    ) -> Result<(), StoreError> {
        let record = self
            .state
            .tools
            .entry(tool.to_string())
            .or_insert_with(|| ToolRecord::new(tool));

        if record.contains(version) {
            log::debug!("{tool} {version} already declared");
        } else {
            record.versions.push(VersionRecord {
                version: version.to_string(),
                path: path.to_path_buf(),
                installed_at: Some(Utc::now()),
            });
            log::debug!("Declared {tool} {version} at {}", path.display());
        }

        self.save()
    }

    fn record_uninstalled(&mut self, tool: &str, version: &str) -> Result<(), StoreError> {
        match self.state.tools.get_mut(tool) {
            Some(record) if record.contains(version) => {
                record.versions.retain(|entry| entry.version != version);
                log::debug!("Removed {tool} {version} from declared state");
            }
            Some(_) => log::info!("{tool} {version} is not declared, nothing to remove"),
            None => log::info!("{tool} has no declared versions, nothing to remove"),
        }

        self.save()
    }

    fn installed_versions(&self, tool: &str) -> Vec<Tool> {
        let mut versions: Vec<Tool> = self
            .state
            .tools
            .get(tool)
            .map(|record| {
                record
                    .versions
                    .iter()
                    .map(|entry| Tool::new(tool, entry.version.as_str()))
                    .collect()
            })
            .unwrap_or_default();
        versions.sort();
        versions
    }

    fn tool_names(&self) -> Vec<String> {
        self.state.tools.keys().cloned().collect()
    }
}
