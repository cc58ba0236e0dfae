use toolver_core::{JobBatch, Manifest, install_job};

use crate::app::App;
use crate::error::CliError;

pub fn run(app: &mut App, name: Option<&str>, version: Option<&str>) -> Result<i32, CliError> {
    match (name, version) {
        (None, _) => {
            let manifest = Manifest::discover(&app.cwd)?;
            if manifest.is_empty() {
                log::info!("No tools declared in .tool-versions");
            }
            let batch: JobBatch = manifest
                .entries()
                .iter()
                .map(|entry| install_job(&app.registry, &entry.name, &entry.version, app.ordering))
                .collect();
            Ok(app.run_batch(batch))
        }
        (Some(name), None) => {
            let manifest = Manifest::discover(&app.cwd)?;
            let version = manifest
                .version_of(name)
                .ok_or_else(|| CliError::NoDeclaredVersion {
                    name: name.to_string(),
                })?;
            let job = install_job(&app.registry, name, version, app.ordering);
            Ok(app.run_job(job))
        }
        (Some(name), Some(version)) => {
            let job = install_job(&app.registry, name, version, app.ordering);
            Ok(app.run_job(job))
        }
    }
}
