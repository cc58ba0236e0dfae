use toolver_backend::Tool;
use toolver_core::{Action, Job, JobBatch};

use crate::app::App;
use crate::error::CliError;

pub fn run(
    app: &mut App,
    name: Option<&str>,
    version: Option<&str>,
    force: bool,
) -> Result<i32, CliError> {
    match (name, version) {
        (None, _) if !force => Err(CliError::ForceRequired),
        (None, _) => {
            let batch = JobBatch::uninstall_declared(&app.registry, &app.store, None);
            Ok(app.run_batch(batch))
        }
        (Some(name), None) => {
            app.require_plugin(name)?;
            let batch = JobBatch::uninstall_declared(&app.registry, &app.store, Some(name));
            Ok(app.run_batch(batch))
        }
        (Some(name), Some(version)) => {
            let job = Job::new(Tool::new(name, version), Action::Uninstall);
            Ok(app.run_job(job))
        }
    }
}
