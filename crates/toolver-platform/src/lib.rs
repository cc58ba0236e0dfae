mod commands;
mod paths;

pub use commands::{HideWindow, script_command};
pub use paths::{AppPaths, AppPathsError, install_dir_in};
