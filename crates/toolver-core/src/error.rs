use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Malformed state file {}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("Could not encode declared state: {message}")]
    Encode { message: String },

    #[error("IO error ({kind}): {message}")]
    IoError {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::IoError {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    #[error("{}:{line_number}: expected `<tool> <version>`, found `{line}`", .path.display())]
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("Invalid manifest entry `{name} {version}`")]
    InvalidEntry { name: String, version: String },

    #[error("IO error ({kind}): {message}")]
    IoError {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl From<std::io::Error> for ManifestError {
    fn from(err: std::io::Error) -> Self {
        ManifestError::IoError {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
