use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use toolver_backend::{BackendError, PluginRegistry, ToolPlugin, VersionOrdering};
use toolver_core::DeclaredStore;

use crate::app::App;

/// Plugin that installs into memory.
pub struct FakePlugin {
    name: String,
    remote: Vec<String>,
    installed: RefCell<BTreeSet<String>>,
}

impl FakePlugin {
    pub fn new(name: &str, remote: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            remote: remote.iter().map(ToString::to_string).collect(),
            installed: RefCell::new(BTreeSet::new()),
        }
    }
}

impl ToolPlugin for FakePlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn remote_versions(&self) -> Result<Vec<String>, BackendError> {
        Ok(self.remote.clone())
    }

    fn install(&self, version: &str) -> Result<(), BackendError> {
        self.installed.borrow_mut().insert(version.to_string());
        Ok(())
    }

    fn uninstall(&self, version: &str) -> Result<(), BackendError> {
        self.installed.borrow_mut().remove(version);
        Ok(())
    }

    fn is_installed(&self, version: &str) -> bool {
        self.installed.borrow().contains(version)
    }

    fn path_for(&self, version: &str) -> PathBuf {
        PathBuf::from("/fake").join(&self.name).join(version)
    }

    fn create_shims(&self) -> Result<(), BackendError> {
        Ok(())
    }

    fn delete_shims(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

/// App rooted in `root`, with `root/project` as the working directory.
pub fn test_app(root: &Path, plugins: Vec<FakePlugin>) -> App {
    let cwd = root.join("project");
    std::fs::create_dir_all(&cwd).expect("project dir should be created");
    let mut registry = PluginRegistry::new();
    for plugin in plugins {
        registry.register(plugin);
    }

    App {
        registry,
        store: DeclaredStore::load(root.join("state.json")),
        ordering: VersionOrdering::Lexicographic,
        cwd,
    }
}
