use thiserror::Error;
use toolver_backend::{BackendError, GENERIC_FAILURE_CODE, ResolveError};
use toolver_core::{Action, ManifestError, StoreError};
use toolver_platform::AppPathsError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Paths(#[from] AppPathsError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("No plugin found for {name}\n==> Please install the corresponding plugin first")]
    PluginNotFound { name: String },

    #[error("You should provide a version in .tool-versions file for the package {name}")]
    NoDeclaredVersion { name: String },

    #[error("Refusing to uninstall every package, use --force if you want to remove them all")]
    ForceRequired,

    #[error("`{action}` is not implemented")]
    NotImplemented { action: Action },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Backend(error) | Self::Resolve(ResolveError::Backend(error)) => error.exit_code(),
            _ => GENERIC_FAILURE_CODE,
        }
    }
}
