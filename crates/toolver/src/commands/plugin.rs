use crate::app::App;
use crate::cli::Command;
use crate::error::CliError;

pub fn list(app: &mut App) -> Result<i32, CliError> {
    if app.registry.is_empty() {
        log::info!("No plugins installed");
    }
    for plugin in app.registry.iter() {
        match plugin.source() {
            Some(dir) => println!("{}\t{}", plugin.name(), dir.display()),
            None => println!("{}", plugin.name()),
        }
    }
    Ok(0)
}

/// Plugin repository management is not supported.
pub fn unsupported(command: &Command) -> Result<i32, CliError> {
    Err(CliError::NotImplemented {
        action: command.action(),
    })
}
