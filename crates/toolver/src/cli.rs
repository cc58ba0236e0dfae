use clap::{ArgAction, Parser, Subcommand};
use toolver_core::Action;

#[derive(Parser, Debug)]
#[command(name = "toolver", version)]
#[command(about = "Install and track versions of development tools", long_about = None)]
pub struct Cli {
    /// More output: -v for debug, -vv for trace
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Proxy host handed to plugin scripts
    #[arg(long, global = true, value_name = "HOST")]
    pub proxy_host: Option<String>,

    /// Proxy port, used together with --proxy-host
    #[arg(long, global = true, value_name = "PORT", requires = "proxy_host")]
    pub proxy_port: Option<u16>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Install a tool version, or everything listed in .tool-versions
    Install {
        /// Tool name; without it every .tool-versions entry is installed
        name: Option<String>,
        /// Version, `latest` or `latest:<prefix>`; defaults to the .tool-versions entry
        version: Option<String>,
    },
    /// Uninstall a tool version, every version of a tool, or everything
    Uninstall {
        name: Option<String>,
        version: Option<String>,
        /// Required to uninstall every tool
        #[arg(short, long)]
        force: bool,
    },
    /// Pin a tool version in ./.tool-versions
    Local { name: String, version: String },
    /// List installed versions
    List { name: Option<String> },
    /// Print the latest available version
    Latest {
        name: String,
        /// Only consider versions starting with this prefix
        prefix: Option<String>,
    },
    /// Manage plugins
    #[command(subcommand)]
    Plugin(PluginCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PluginCommand {
    /// List installed plugins
    List,
    /// Add a plugin from a repository
    Add { name: String, url: Option<String> },
    /// Remove a plugin
    Remove { name: String },
    /// Update one plugin, or all of them
    Update { name: Option<String> },
}

impl Command {
    pub fn action(&self) -> Action {
        match self {
            Self::Install { .. } => Action::Install,
            Self::Uninstall { .. } => Action::Uninstall,
            Self::Local { .. } => Action::Local,
            Self::List { .. } => Action::List,
            Self::Latest { .. } => Action::Latest,
            Self::Plugin(PluginCommand::List) => Action::PluginList,
            Self::Plugin(PluginCommand::Add { .. }) => Action::PluginAdd,
            Self::Plugin(PluginCommand::Remove { .. }) => Action::PluginRemove,
            Self::Plugin(PluginCommand::Update { .. }) => Action::PluginUpdate,
        }
    }
}

impl Cli {
    /// Proxy URL for plugin scripts, if a host was given.
    pub fn proxy(&self) -> Option<String> {
        self.proxy_host
            .as_deref()
            .map(|host| toolver_script::proxy_url(host, self.proxy_port))
    }
}
