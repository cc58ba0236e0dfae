use toolver_backend::GENERIC_FAILURE_CODE;

/// Why a job finished. Each outcome maps to exactly one result code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Installed,
    Uninstalled,
    /// Physical and declared state already matched the request.
    AlreadyReconciled,
    PluginNotFound,
    VersionNotInstallable,
    /// The plugin's install or uninstall call failed with `code`.
    PluginFailed { code: i32 },
    /// A read-only plugin query failed before anything was changed.
    PluginError { message: String },
    /// No concrete version could be determined for the job.
    Unresolved { reason: String },
    NotImplemented,
}

impl JobOutcome {
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Installed | Self::Uninstalled | Self::AlreadyReconciled => 0,
            Self::PluginFailed { code } => *code,
            Self::PluginNotFound
            | Self::VersionNotInstallable
            | Self::PluginError { .. }
            | Self::Unresolved { .. }
            | Self::NotImplemented => GENERIC_FAILURE_CODE,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code() == 0
    }
}

impl std::fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Installed => f.write_str("installed"),
            Self::Uninstalled => f.write_str("uninstalled"),
            Self::AlreadyReconciled => f.write_str("nothing to do"),
            Self::PluginNotFound => f.write_str("no plugin"),
            Self::VersionNotInstallable => f.write_str("version not available"),
            Self::PluginFailed { code } => write!(f, "plugin failed with code {code}"),
            Self::PluginError { message } => write!(f, "plugin error: {message}"),
            Self::Unresolved { reason } => write!(f, "unresolved: {reason}"),
            Self::NotImplemented => f.write_str("not implemented"),
        }
    }
}
