//! Plugins driven by shell scripts in a plugin directory.
//!
//! Each plugin lives in `<plugins_dir>/<name>/bin/` and provides `list-all`
//! and `install`, plus an optional `uninstall`.

mod context;
mod discovery;
mod plugin;
mod shims;

pub use context::{PluginContext, proxy_url};
pub use discovery::{PluginDetection, detect_plugins, discover_plugins};
pub use plugin::{INSTALL_SCRIPT, LIST_ALL_SCRIPT, ScriptPlugin, UNINSTALL_SCRIPT};
