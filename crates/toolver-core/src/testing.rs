use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use toolver_backend::{BackendError, Tool, ToolPlugin};

use crate::error::StoreError;
use crate::store::StateStore;

#[derive(Clone, Default)]
pub(crate) struct Calls {
    pub remote: Rc<Cell<usize>>,
    pub install: Rc<Cell<usize>>,
    pub uninstall: Rc<Cell<usize>>,
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

pub(crate) struct MockPlugin {
    name: String,
    remote: Vec<String>,
    physical: RefCell<BTreeSet<String>>,
    install_failure: Option<i32>,
    uninstall_failure: Option<i32>,
    remote_failure: bool,
    calls: Calls,
}

impl MockPlugin {
    pub fn new(name: &str, remote: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            remote: remote.iter().map(ToString::to_string).collect(),
            physical: RefCell::new(BTreeSet::new()),
            install_failure: None,
            uninstall_failure: None,
            remote_failure: false,
            calls: Calls::default(),
        }
    }

    pub fn with_installed(self, versions: &[&str]) -> Self {
        self.physical
            .borrow_mut()
            .extend(versions.iter().map(ToString::to_string));
        self
    }

    pub fn failing_install(mut self, code: i32) -> Self {
        self.install_failure = Some(code);
        self
    }

    pub fn failing_uninstall(mut self, code: i32) -> Self {
        self.uninstall_failure = Some(code);
        self
    }

    pub fn failing_remote(mut self) -> Self {
        self.remote_failure = true;
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.clone()
    }
}

impl ToolPlugin for MockPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn remote_versions(&self) -> Result<Vec<String>, BackendError> {
        bump(&self.calls.remote);
        if self.remote_failure {
            return Err(BackendError::command_failed("bin/list-all", 6, "offline"));
        }
        Ok(self.remote.clone())
    }

    fn install(&self, version: &str) -> Result<(), BackendError> {
        bump(&self.calls.install);
        if let Some(code) = self.install_failure {
            return Err(BackendError::command_failed("bin/install", code, "boom"));
        }
        self.physical.borrow_mut().insert(version.to_string());
        Ok(())
    }

    fn uninstall(&self, version: &str) -> Result<(), BackendError> {
        bump(&self.calls.uninstall);
        if let Some(code) = self.uninstall_failure {
            return Err(BackendError::command_failed("bin/uninstall", code, "boom"));
        }
        self.physical.borrow_mut().remove(version);
        Ok(())
    }

    fn is_installed(&self, version: &str) -> bool {
        self.physical.borrow().contains(version)
    }

    fn path_for(&self, version: &str) -> PathBuf {
        PathBuf::from("/installs").join(&self.name).join(version)
    }

    fn create_shims(&self) -> Result<(), BackendError> {
        Ok(())
    }

    fn delete_shims(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

/// In-memory [`StateStore`] counting its mutations.
#[derive(Default)]
pub(crate) struct MemoryStore {
    tools: BTreeMap<String, BTreeMap<String, PathBuf>>,
    installed_calls: usize,
    uninstalled_calls: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn with_declared(mut self, tool: &str, versions: &[&str]) -> Self {
        let entry = self.tools.entry(tool.to_string()).or_default();
        for version in versions {
            entry.insert((*version).to_string(), PathBuf::from("/declared"));
        }
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn record_installed_calls(&self) -> usize {
        self.installed_calls
    }

    pub fn record_uninstalled_calls(&self) -> usize {
        self.uninstalled_calls
    }

    pub fn path_of(&self, tool: &str, version: &str) -> Option<&Path> {
        self.tools.get(tool)?.get(version).map(PathBuf::as_path)
    }

    fn persist(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::from(std::io::Error::from(
                std::io::ErrorKind::PermissionDenied,
            )));
        }
        Ok(())
    }
}

impl StateStore for MemoryStore {
    fn is_installed(&self, tool: &str, version: &str) -> bool {
        self.tools
            .get(tool)
            .is_some_and(|versions| versions.contains_key(version))
    }

    fn record_installed(
        &mut self,
        tool: &str,
        version: &str,
        path: &Path,
    ) -> Result<(), StoreError> {
        self.installed_calls += 1;
        self.tools
            .entry(tool.to_string())
            .or_default()
            .entry(version.to_string())
            .or_insert_with(|| path.to_path_buf());
        self.persist()
    }

    fn record_uninstalled(&mut self, tool: &str, version: &str) -> Result<(), StoreError> {
        self.uninstalled_calls += 1;
        if let Some(versions) = self.tools.get_mut(tool) {
            versions.remove(version);
        }
        self.persist()
    }

    fn installed_versions(&self, tool: &str) -> Vec<Tool> {
        self.tools
            .get(tool)
            .map(|versions| versions.keys().map(|v| Tool::new(tool, v.as_str())).collect())
            .unwrap_or_default()
    }

    fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}
