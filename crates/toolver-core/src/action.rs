/// Every command kind the tool knows about. Only some have a reconciliation
/// handler; see [`handler_for`](crate::handler_for).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PluginAdd,
    PluginList,
    PluginRemove,
    PluginUpdate,
    Install,
    Uninstall,
    Current,
    Where,
    Which,
    Local,
    Shell,
    Latest,
    List,
    Help,
    Exec,
    Env,
    Info,
    Reshim,
    ShimVersions,
    Update,
    UpdateHead,
}

impl Action {
    pub const ALL: [Self; 21] = [
        Self::PluginAdd,
        Self::PluginList,
        Self::PluginRemove,
        Self::PluginUpdate,
        Self::Install,
        Self::Uninstall,
        Self::Current,
        Self::Where,
        Self::Which,
        Self::Local,
        Self::Shell,
        Self::Latest,
        Self::List,
        Self::Help,
        Self::Exec,
        Self::Env,
        Self::Info,
        Self::Reshim,
        Self::ShimVersions,
        Self::Update,
        Self::UpdateHead,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PluginAdd => "plugin-add",
            Self::PluginList => "plugin-list",
            Self::PluginRemove => "plugin-remove",
            Self::PluginUpdate => "plugin-update",
            Self::Install => "install",
            Self::Uninstall => "uninstall",
            Self::Current => "current",
            Self::Where => "where",
            Self::Which => "which",
            Self::Local => "local",
            Self::Shell => "shell",
            Self::Latest => "latest",
            Self::List => "list",
            Self::Help => "help",
            Self::Exec => "exec",
            Self::Env => "env",
            Self::Info => "info",
            Self::Reshim => "reshim",
            Self::ShimVersions => "shim-versions",
            Self::Update => "update",
            Self::UpdateHead => "update-head",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Action;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = Action::ALL.iter().map(|action| action.as_str()).collect();
        assert_eq!(names.len(), Action::ALL.len());
    }

    #[test]
    fn display_outputs_action_name() {
        assert_eq!(Action::ShimVersions.to_string(), "shim-versions");
    }
}
