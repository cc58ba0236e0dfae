mod install;
mod latest;
mod list;
mod local;
mod plugin;
mod uninstall;

use crate::app::App;
use crate::cli::{Command, PluginCommand};
use crate::error::CliError;

/// Run `command`, returning the process exit code.
pub fn execute(app: &mut App, command: Command) -> Result<i32, CliError> {
    log::debug!("Running {}", command.action());
    match command {
        Command::Install { name, version } => {
            install::run(app, name.as_deref(), version.as_deref())
        }
        Command::Uninstall {
            name,
            version,
            force,
        } => uninstall::run(app, name.as_deref(), version.as_deref(), force),
        Command::Local { name, version } => local::run(app, &name, &version),
        Command::List { name } => list::run(app, name.as_deref()),
        Command::Latest { name, prefix } => latest::run(app, &name, prefix.as_deref()),
        Command::Plugin(PluginCommand::List) => plugin::list(app),
        Command::Plugin(other) => plugin::unsupported(&Command::Plugin(other)),
    }
}
