use crate::app::App;
use crate::error::CliError;

pub fn run(app: &mut App, name: &str, prefix: Option<&str>) -> Result<i32, CliError> {
    let plugin = app.registry.get(name).ok_or_else(|| CliError::PluginNotFound {
        name: name.to_string(),
    })?;
    let version = plugin.latest_version(prefix, app.ordering)?;
    println!("{version}");
    Ok(0)
}
