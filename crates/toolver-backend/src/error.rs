use thiserror::Error;

/// Exit code reported for failures that carry no process status of their own.
pub const GENERIC_FAILURE_CODE: i32 = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Plugin script not found: {script}")]
    ScriptNotFound { script: String },

    #[error("Command `{command}` exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Command `{command}` was terminated by a signal")]
    Terminated { command: String },

    #[error("Installation failed during {phase}: {details}")]
    InstallFailed {
        phase: &'static str,
        details: String,
    },

    #[error("IO error ({kind}): {message}")]
    IoError {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl BackendError {
    pub fn install_failed(phase: &'static str, details: impl Into<String>) -> Self {
        Self::InstallFailed {
            phase,
            details: details.into(),
        }
    }

    pub fn command_failed(command: impl Into<String>, code: i32, stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Process exit code this failure should surface as.
    ///
    /// A failing command keeps its own non-zero status so callers can pass it
    /// through unchanged; everything else maps to [`GENERIC_FAILURE_CODE`].
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } if *code != 0 => *code,
            _ => GENERIC_FAILURE_CODE,
        }
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::IoError {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
