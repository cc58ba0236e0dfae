use std::path::{Path, PathBuf};

use crate::error::ManifestError;
use crate::fs::write_atomic;

pub const MANIFEST_FILE_NAME: &str = ".tool-versions";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ManifestEntry {
    pub name: String,
    pub version: String,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// The per-project `.tool-versions` file: desired `<tool> <version>` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    path: Option<PathBuf>,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Nearest `.tool-versions` in `start_dir` or one of its ancestors.
    #[must_use]
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(MANIFEST_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load the nearest manifest above `start_dir`, or an empty one when the
    /// search reaches the filesystem root without a match.
    ///
    /// # Errors
    /// Fails when the file found cannot be read or has a malformed line.
    pub fn discover(start_dir: &Path) -> Result<Self, ManifestError> {
        match Self::find(start_dir) {
            Some(path) => Self::load(&path),
            None => {
                log::debug!(
                    "No {MANIFEST_FILE_NAME} found above {}",
                    start_dir.display()
                );
                Ok(Self::default())
            }
        }
    }

    /// # Errors
    /// Fails when `path` cannot be read or has a malformed line.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        let entries = parse(path, &content)?;
        log::debug!("Read {} entries from {}", entries.len(), path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            entries,
        })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared version of `name`; the first line wins if it is listed twice.
    #[must_use]
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.version.as_str())
    }

    /// Pin `name` to `version` in `<dir>/.tool-versions`, creating the file if
    /// needed. The file is rewritten with its comment lines first, then every
    /// entry sorted. Blank lines are not kept.
    ///
    /// # Errors
    /// Fails on an invalid name/version, an unreadable or malformed existing
    /// file, or a failed write.
    pub fn set_entry(dir: &Path, name: &str, version: &str) -> Result<PathBuf, ManifestError> {
        if !is_token(name) || !is_token(version) {
            return Err(ManifestError::InvalidEntry {
                name: name.to_string(),
                version: version.to_string(),
            });
        }

        let path = dir.join(MANIFEST_FILE_NAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(error) => return Err(error.into()),
        };
        let mut entries = parse(&path, &content)?;

        entries.retain(|entry| entry.name != name);
        entries.push(ManifestEntry::new(name, version));
        entries.sort();

        let comments: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with('#'))
            .collect();
        write_atomic(&path, render(&comments, &entries).as_bytes())?;
        log::info!("Set {name} {version} in {}", path.display());
        Ok(path)
    }
}

/// Parse manifest `content`; `path` is only used for error reporting.
///
/// # Errors
/// [`ManifestError::MalformedLine`] for any non-blank, non-comment line that
/// is not exactly two whitespace-separated tokens.
pub fn parse(path: &Path, content: &str) -> Result<Vec<ManifestEntry>, ManifestError> {
    let mut entries = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(name), Some(version), None) => entries.push(ManifestEntry::new(name, version)),
            _ => {
                return Err(ManifestError::MalformedLine {
                    path: path.to_path_buf(),
                    line_number: index + 1,
                    line: line.to_string(),
                });
            }
        }
    }
    Ok(entries)
}

fn render(comments: &[&str], entries: &[ManifestEntry]) -> String {
    let mut out = String::new();
    for comment in comments {
        out.push_str(comment);
        out.push('\n');
    }
    for entry in entries {
        out.push_str(&entry.name);
        out.push(' ');
        out.push_str(&entry.version);
        out.push('\n');
    }
    out
}

fn is_token(value: &str) -> bool {
    !value.is_empty() && !value.contains(char::is_whitespace) && !value.starts_with('#')
}
