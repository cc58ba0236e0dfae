use std::path::{Path, PathBuf};

use toolver_backend::VersionOrdering;

const SHIM_MARKER: &str = "# toolver-shim: ";

/// Versions of `tool` with an install directory under `installs_dir`.
pub(crate) fn installed_versions(installs_dir: &Path, tool: &str) -> std::io::Result<Vec<String>> {
    let tool_dir = installs_dir.join(tool);
    let entries = match std::fs::read_dir(&tool_dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => return Err(error),
    };

    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir()
            && let Some(name) = entry.file_name().to_str()
        {
            versions.push(name.to_string());
        }
    }
    Ok(versions)
}

/// Rewrite the shims of `tool` to point at its highest installed version.
/// With nothing installed the tool's shims are only removed.
///
/// Returns the number of shims written.
pub(crate) fn refresh(
    shims_dir: &Path,
    installs_dir: &Path,
    tool: &str,
    ordering: VersionOrdering,
) -> std::io::Result<usize> {
    remove(shims_dir, tool)?;

    let mut versions = installed_versions(installs_dir, tool)?;
    versions.sort_by(|a, b| ordering.compare(b, a));
    let Some(highest) = versions.first() else {
        log::debug!("No installed version of {tool}, shims removed");
        return Ok(0);
    };

    let install_dir = installs_dir.join(tool).join(highest);
    let targets = shim_targets(&install_dir, tool)?;
    std::fs::create_dir_all(shims_dir)?;
    for (name, target) in &targets {
        write_shim(shims_dir, tool, name, target)?;
    }
    log::debug!(
        "Wrote {} shims for {tool} {highest} in {}",
        targets.len(),
        shims_dir.display()
    );
    Ok(targets.len())
}

/// Remove every shim marked as belonging to `tool`. Returns how many went.
pub(crate) fn remove(shims_dir: &Path, tool: &str) -> std::io::Result<usize> {
    let entries = match std::fs::read_dir(shims_dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(error) => return Err(error),
    };

    let mut removed = 0;
    for entry in entries {
        let path = entry?.path();
        if shim_owner(&path).as_deref() == Some(tool) {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Tool named in the marker line of the shim at `path`, if it is one.
pub(crate) fn shim_owner(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    let content = std::fs::read_to_string(path).ok()?;
    content
        .lines()
        .take(2)
        .find_map(|line| line.strip_prefix(SHIM_MARKER))
        .map(|owner| owner.trim().to_string())
}

fn shim_targets(install_dir: &Path, tool: &str) -> std::io::Result<Vec<(String, PathBuf)>> {
    let bin_dir = install_dir.join("bin");
    if !bin_dir.is_dir() {
        return Ok(vec![(tool.to_string(), install_dir.join(tool))]);
    }

    let mut targets = Vec::new();
    for entry in std::fs::read_dir(&bin_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            targets.push((name.to_string(), entry.path()));
        }
    }
    targets.sort();
    Ok(targets)
}

fn write_shim(shims_dir: &Path, tool: &str, name: &str, target: &Path) -> std::io::Result<()> {
    let path = shims_dir.join(name);
    if let Some(owner) = shim_owner(&path)
        && owner != tool
    {
        log::warn!("Shim {name} of {owner} is replaced by {tool}");
    }

    let content = format!(
        "#!/bin/sh\n{SHIM_MARKER}{tool}\nexec {} \"$@\"\n",
        shell_quote(&target.to_string_lossy())
    );
    std::fs::write(&path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
