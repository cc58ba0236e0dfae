use toolver_backend::LatestRequest;
use toolver_core::Manifest;

use crate::app::App;
use crate::error::CliError;

/// Pin `name` to `version` in the current directory's `.tool-versions`.
/// A `latest[:prefix]` request is pinned as the version it resolves to.
pub fn run(app: &mut App, name: &str, version: &str) -> Result<i32, CliError> {
    let version = match (LatestRequest::parse(version), app.registry.get(name)) {
        (Some(request), Some(plugin)) => plugin.latest_version(request.prefix(), app.ordering)?,
        (Some(_), None) => {
            return Err(CliError::PluginNotFound {
                name: name.to_string(),
            });
        }
        (None, plugin) => {
            if plugin.is_none() {
                log::warn!("No plugin found for {name}, pinning {version} anyway");
            }
            version.to_string()
        }
    };

    let path = Manifest::set_entry(&app.cwd, name, &version)?;
    println!("{name} {version} pinned in {}", path.display());
    Ok(0)
}
