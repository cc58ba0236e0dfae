use std::path::{Path, PathBuf};

use toolver_backend::{BackendError, PluginRegistry};

use crate::context::PluginContext;
use crate::plugin::{LIST_ALL_SCRIPT, ScriptPlugin};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDetection {
    pub name: String,
    pub dir: PathBuf,
}

/// Plugin directories under `plugins_dir`, sorted by name. A directory is a
/// plugin when it has a `bin/list-all` file.
///
/// # Errors
/// Fails when `plugins_dir` exists but cannot be listed.
pub fn detect_plugins(plugins_dir: &Path) -> Result<Vec<PluginDetection>, BackendError> {
    let entries = match std::fs::read_dir(plugins_dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("Plugins directory {} does not exist", plugins_dir.display());
            return Ok(Vec::new());
        }
        Err(error) => return Err(error.into()),
    };

    let mut detections = Vec::new();
    for entry in entries {
        let entry = entry?;
        let dir = entry.path();
        let Some(name) = entry.file_name().to_str().map(ToString::to_string) else {
            log::warn!("Skipping plugin directory with non UTF-8 name: {}", dir.display());
            continue;
        };
        if !dir.join("bin").join(LIST_ALL_SCRIPT).is_file() {
            log::debug!("Skipping {}: no bin/{LIST_ALL_SCRIPT}", dir.display());
            continue;
        }
        detections.push(PluginDetection { name, dir });
    }

    detections.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(detections)
}

/// Registry of every script plugin found under `plugins_dir`.
///
/// # Errors
/// Fails when `plugins_dir` exists but cannot be listed.
pub fn discover_plugins(
    plugins_dir: &Path,
    context: &PluginContext,
) -> Result<PluginRegistry, BackendError> {
    let mut registry = PluginRegistry::new();
    for detection in detect_plugins(plugins_dir)? {
        log::debug!("Found plugin {} in {}", detection.name, detection.dir.display());
        registry.register(ScriptPlugin::new(
            detection.name,
            detection.dir,
            context.clone(),
        ));
    }
    Ok(registry)
}
