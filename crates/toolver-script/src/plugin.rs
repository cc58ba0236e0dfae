use log::{debug, error, info, trace, warn};
use std::path::{Path, PathBuf};
use std::process::Command;

use toolver_backend::{BackendError, ToolPlugin};
use toolver_platform::{install_dir_in, script_command};

use crate::context::PluginContext;
use crate::shims;

pub const LIST_ALL_SCRIPT: &str = "list-all";
pub const INSTALL_SCRIPT: &str = "install";
pub const UNINSTALL_SCRIPT: &str = "uninstall";

/// A plugin backed by a directory of shell scripts under `bin/`.
#[derive(Debug, Clone)]
pub struct ScriptPlugin {
    name: String,
    dir: PathBuf,
    context: PluginContext,
}

impl ScriptPlugin {
    #[must_use]
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>, context: PluginContext) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            context,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn script_path(&self, script: &str) -> PathBuf {
        self.dir.join("bin").join(script)
    }

    fn build_command(&self, script: &Path, version: Option<&str>) -> Command {
        debug!("Building {} command: {}", self.name, script.display());

        let mut cmd = script_command(script);
        cmd.current_dir(&self.dir);
        cmd.env("TOOLVER_PLUGIN_NAME", &self.name);

        if let Some(version) = version {
            cmd.env("TOOLVER_INSTALL_VERSION", version);
            cmd.env("TOOLVER_INSTALL_PATH", self.path_for(version));
        }

        if let Some(proxy) = &self.context.proxy {
            debug!("Setting http_proxy/https_proxy={proxy}");
            cmd.env("http_proxy", proxy);
            cmd.env("https_proxy", proxy);
        }

        cmd
    }

    fn execute(&self, script: &str, version: Option<&str>) -> Result<String, BackendError> {
        let path = self.script_path(script);
        if !path.is_file() {
            return Err(BackendError::ScriptNotFound {
                script: path.display().to_string(),
            });
        }

        let label = format!("{}/bin/{script}", self.name);
        info!("Executing {label} {}", version.unwrap_or_default());

        let output = self.build_command(&path, version).output()?;

        debug!("{label} exit status: {:?}", output.status);
        trace!("{label} stdout: {}", String::from_utf8_lossy(&output.stdout));

        if !output.stderr.is_empty() {
            trace!("{label} stderr: {}", String::from_utf8_lossy(&output.stderr));
        }

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        match output.status.code() {
            Some(code) => {
                error!("{label} failed with code {code}: '{stderr}'");
                Err(BackendError::command_failed(label, code, stderr))
            }
            None => {
                error!("{label} was terminated by a signal");
                Err(BackendError::Terminated { command: label })
            }
        }
    }

    fn refresh_shims(&self) -> Result<(), BackendError> {
        shims::refresh(
            &self.context.shims_dir,
            &self.context.installs_dir,
            &self.name,
            self.context.ordering,
        )?;
        Ok(())
    }
}

impl ToolPlugin for ScriptPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn source(&self) -> Option<&Path> {
        Some(&self.dir)
    }

    fn remote_versions(&self) -> Result<Vec<String>, BackendError> {
        let output = self.execute(LIST_ALL_SCRIPT, None)?;
        Ok(parse_version_list(&output))
    }

    fn install(&self, version: &str) -> Result<(), BackendError> {
        let install_dir = self.path_for(version);
        let created = !install_dir.exists();
        std::fs::create_dir_all(&install_dir)
            .map_err(|e| BackendError::install_failed("prepare", e.to_string()))?;

        if let Err(error) = self.execute(INSTALL_SCRIPT, Some(version)) {
            if created {
                debug!("Removing {} after failed install", install_dir.display());
                if let Err(cleanup) = std::fs::remove_dir_all(&install_dir) {
                    warn!("Could not remove {}: {cleanup}", install_dir.display());
                }
            }
            return Err(error);
        }

        self.refresh_shims()
            .map_err(|e| BackendError::install_failed("shims", e.to_string()))
    }

    fn uninstall(&self, version: &str) -> Result<(), BackendError> {
        if self.script_path(UNINSTALL_SCRIPT).is_file() {
            self.execute(UNINSTALL_SCRIPT, Some(version))?;
        }

        let install_dir = self.path_for(version);
        if install_dir.exists() {
            debug!("Removing {}", install_dir.display());
            std::fs::remove_dir_all(&install_dir)?;
        }

        self.refresh_shims()
    }

    fn is_installed(&self, version: &str) -> bool {
        self.path_for(version).is_dir()
    }

    fn path_for(&self, version: &str) -> PathBuf {
        install_dir_in(&self.context.installs_dir, &self.name, version)
    }

    fn create_shims(&self) -> Result<(), BackendError> {
        self.refresh_shims()
    }

    fn delete_shims(&self) -> Result<(), BackendError> {
        let removed = shims::remove(&self.context.shims_dir, &self.name)?;
        debug!("Removed {removed} shims of {}", self.name);
        Ok(())
    }
}

/// Versions printed by `list-all`: whitespace separated, in any order.
pub(crate) fn parse_version_list(output: &str) -> Vec<String> {
    output.split_whitespace().map(ToString::to_string).collect()
}
