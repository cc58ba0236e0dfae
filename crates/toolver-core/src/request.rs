use toolver_backend::{LatestRequest, PluginRegistry, Tool, VersionOrdering};

use crate::action::Action;
use crate::job::Job;

/// Install job for `requested` of `name`.
///
/// `latest` and `latest:<prefix>` are resolved against the plugin's remote
/// versions here. A failed resolution yields a finished, failed job so the
/// rest of a batch still runs. Without a plugin the request is left as is and
/// the dispatcher reports the missing plugin.
#[must_use]
pub fn install_job(
    registry: &PluginRegistry,
    name: &str,
    requested: &str,
    ordering: VersionOrdering,
) -> Job {
    let Some(latest) = LatestRequest::parse(requested) else {
        return Job::new(Tool::new(name, requested), Action::Install);
    };
    let Some(plugin) = registry.get(name) else {
        return Job::new(Tool::new(name, requested), Action::Install);
    };

    match plugin.latest_version(latest.prefix(), ordering) {
        Ok(version) => {
            log::info!("Resolved {name} {requested} to {version}");
            Job::new(Tool::new(name, version), Action::Install)
        }
        Err(error) => {
            log::error!("Could not resolve {name} {requested}: {error}");
            Job::unresolved(
                Tool::new(name, requested),
                Action::Install,
                error.to_string(),
            )
        }
    }
}
