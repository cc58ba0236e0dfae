use std::path::PathBuf;

use toolver_backend::{PluginRegistry, VersionOrdering};
use toolver_core::{DeclaredStore, Job, JobBatch};
use toolver_platform::AppPaths;
use toolver_script::{PluginContext, discover_plugins};

use crate::error::CliError;
use crate::settings::Settings;

/// Everything a command needs, built once per run.
pub struct App {
    pub registry: PluginRegistry,
    pub store: DeclaredStore,
    pub ordering: VersionOrdering,
    pub cwd: PathBuf,
}

impl App {
    pub fn bootstrap(
        paths: &AppPaths,
        settings: &Settings,
        proxy: Option<String>,
    ) -> Result<Self, CliError> {
        let plugins_dir = settings.plugins_dir(paths);
        let context = PluginContext::new(paths.installs_dir(), paths.shims_dir())
            .with_proxy(proxy)
            .with_ordering(settings.version_ordering);
        let registry = discover_plugins(&plugins_dir, &context)?;
        log::debug!(
            "Loaded {} plugins from {}",
            registry.len(),
            plugins_dir.display()
        );

        let store = DeclaredStore::load(paths.state_file());
        let cwd = std::env::current_dir()?;

        Ok(Self {
            registry,
            store,
            ordering: settings.version_ordering,
            cwd,
        })
    }

    pub fn require_plugin(&self, name: &str) -> Result<(), CliError> {
        if self.registry.contains(name) {
            Ok(())
        } else {
            Err(CliError::PluginNotFound {
                name: name.to_string(),
            })
        }
    }

    /// Run one job; its own code is the exit code.
    pub fn run_job(&mut self, mut job: Job) -> i32 {
        job.run(&self.registry, &mut self.store);
        job.returned_code()
    }

    /// Run a batch; the aggregate code is the exit code.
    pub fn run_batch(&mut self, mut batch: JobBatch) -> i32 {
        if batch.is_empty() {
            log::info!("Nothing to do");
            return 0;
        }

        batch.run(&self.registry, &mut self.store);

        let failures = batch.failures();
        if failures > 0 {
            log::error!("{failures} of {} jobs failed:", batch.len());
            for job in batch.failed_jobs() {
                let reason = job
                    .outcome()
                    .map_or_else(|| "not run".to_string(), ToString::to_string);
                log::error!("  {} {}: {reason}", job.action(), job.tool());
            }
        }
        batch.result_code()
    }
}
