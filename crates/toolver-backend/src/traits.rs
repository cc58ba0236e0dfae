use std::path::{Path, PathBuf};

use crate::error::BackendError;
use crate::resolve::{ResolveError, select_latest};
use crate::types::VersionOrdering;

/// Backend capability for one kind of tool.
///
/// Implementations are looked up by [`ToolPlugin::name`] in a
/// [`PluginRegistry`](crate::PluginRegistry). Physical checks such as
/// [`ToolPlugin::is_installed`] must not consult any persisted declared state.
pub trait ToolPlugin {
    fn name(&self) -> &str;

    /// Directory the plugin was loaded from, if it has one.
    fn source(&self) -> Option<&Path> {
        None
    }

    /// Every version the plugin can fetch. No ordering or uniqueness is
    /// guaranteed.
    fn remote_versions(&self) -> Result<Vec<String>, BackendError>;

    fn is_version_installable(&self, version: &str) -> Result<bool, BackendError> {
        Ok(self.remote_versions()?.iter().any(|v| v == version))
    }

    /// Realize `version` on disk, including its shims.
    fn install(&self, version: &str) -> Result<(), BackendError>;

    fn uninstall(&self, version: &str) -> Result<(), BackendError>;

    fn is_installed(&self, version: &str) -> bool;

    /// Where `version` is, or would be, installed.
    fn path_for(&self, version: &str) -> PathBuf;

    fn create_shims(&self) -> Result<(), BackendError>;

    fn delete_shims(&self) -> Result<(), BackendError>;

    /// Latest remote version, optionally restricted to versions starting
    /// with `prefix`.
    fn latest_version(
        &self,
        prefix: Option<&str>,
        ordering: VersionOrdering,
    ) -> Result<String, ResolveError> {
        let remote = self.remote_versions()?;
        select_latest(self.name(), remote, prefix, ordering)
    }
}

impl<T: ToolPlugin + 'static> From<T> for Box<dyn ToolPlugin> {
    fn from(plugin: T) -> Self {
        Box::new(plugin)
    }
}
