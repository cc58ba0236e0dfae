use thiserror::Error;

use crate::error::BackendError;
use crate::types::VersionOrdering;

const LATEST_KEYWORD: &str = "latest";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No version found for package {tool}")]
    NoRemoteVersions { tool: String },

    #[error("No version of {tool} starts with '{prefix}'")]
    NoMatchingVersion { tool: String, prefix: String },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// A `latest` or `latest:<prefix>` version request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRequest {
    prefix: Option<String>,
}

impl LatestRequest {
    /// Returns `None` when `requested` is an ordinary version string.
    #[must_use]
    pub fn parse(requested: &str) -> Option<Self> {
        let rest = requested.strip_prefix(LATEST_KEYWORD)?;
        if rest.is_empty() {
            return Some(Self { prefix: None });
        }
        let prefix = rest.strip_prefix(':')?;
        Some(Self {
            prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
        })
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

/// Pick the highest version of `versions` under `ordering`, keeping only
/// those that start with `prefix` when one is given.
///
/// # Errors
/// [`ResolveError::NoRemoteVersions`] if `versions` is empty and
/// [`ResolveError::NoMatchingVersion`] if the prefix filter removes every
/// candidate.
pub fn select_latest(
    tool: &str,
    mut versions: Vec<String>,
    prefix: Option<&str>,
    ordering: VersionOrdering,
) -> Result<String, ResolveError> {
    if versions.is_empty() {
        return Err(ResolveError::NoRemoteVersions {
            tool: tool.to_string(),
        });
    }

    versions.sort_by(|a, b| ordering.compare(b, a));
    log::trace!("{tool} remote versions, newest first: {versions:?}");

    let latest = versions
        .into_iter()
        .find(|v| prefix.is_none_or(|p| v.starts_with(p)));

    latest.ok_or_else(|| ResolveError::NoMatchingVersion {
        tool: tool.to_string(),
        prefix: prefix.unwrap_or_default().to_string(),
    })
}
