use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identity of one installable unit: a tool name at a version, plus the
/// provider and source url it came from.
///
/// Ordering is by name, then version, then provider. Two tools describe the
/// same installable unit when name and version match; provider and url are
/// metadata only (see [`Tool::same_unit`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tool {
    name: String,
    #[serde(default = "default_provider")]
    provider: String,
    version: String,
    #[serde(default)]
    url: String,
}

fn default_provider() -> String {
    Tool::DEFAULT_PROVIDER.to_string()
}

impl Tool {
    pub const DEFAULT_PROVIDER: &'static str = "default";

    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider: default_provider(),
            version: version.into(),
            url: String::new(),
        }
    }

    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn same_unit(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version
    }
}

impl Ord for Tool {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.version.cmp(&other.version))
            .then_with(|| self.provider.cmp(&other.provider))
            // keeps Ord consistent with the derived Eq
            .then_with(|| self.url.cmp(&other.url))
    }
}

impl PartialOrd for Tool {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// How version strings are ranked when picking the "latest" one.
///
/// `Lexicographic` compares raw bytes, so `"9"` ranks above `"10"`. It is the
/// default because manifests and plugins are not required to use semver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionOrdering {
    #[default]
    Lexicographic,
    Semantic,
}

impl VersionOrdering {
    #[must_use]
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Lexicographic => a.cmp(b),
            Self::Semantic => match (parse_loose(a), parse_loose(b)) {
                (Some(left), Some(right)) => left.cmp(&right).then_with(|| a.cmp(b)),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => a.cmp(b),
            },
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lexicographic => "lexicographic",
            Self::Semantic => "semantic",
        }
    }
}

impl fmt::Display for VersionOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `1`, `1.2`, `v1.2.3` and full semver strings; missing components are
/// padded with zero.
fn parse_loose(raw: &str) -> Option<semver::Version> {
    let trimmed = raw.trim();
    let s = trimmed.strip_prefix('v').unwrap_or(trimmed);
    if let Ok(version) = semver::Version::parse(s) {
        return Some(version);
    }

    let split = s.find(['-', '+']).unwrap_or(s.len());
    let (core, rest) = s.split_at(split);
    let padded = match core.split('.').count() {
        1 => format!("{core}.0.0{rest}"),
        2 => format!("{core}.0{rest}"),
        _ => return None,
    };
    semver::Version::parse(&padded).ok()
}
