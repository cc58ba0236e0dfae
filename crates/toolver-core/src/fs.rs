use std::io::Write;
use std::path::Path;

/// Replace `path` with `data` through a uniquely named sibling temp file, so
/// readers see either the old or the new contents.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no parent")
    })?;
    std::fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("state");
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    let pid = std::process::id();

    let mut tmp_path = None;
    for attempt in 0..16_u8 {
        let candidate = parent.join(format!(".{file_name}.{pid}.{timestamp}.{attempt}.tmp"));
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(mut file) => {
                let written = file.write_all(data).and_then(|()| file.sync_all());
                drop(file);
                discard_on_error(&candidate, written)?;
                tmp_path = Some(candidate);
                break;
            }
            Err(error) if error.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(error) => return Err(error),
        }
    }

    let Some(tmp_path) = tmp_path else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "failed to create unique temp file",
        ));
    };

    discard_on_error(&tmp_path, std::fs::rename(&tmp_path, path))
}

/// Pass `result` through, removing the temp file at `tmp_path` if it failed.
fn discard_on_error(tmp_path: &Path, result: std::io::Result<()>) -> std::io::Result<()> {
    if result.is_err() {
        let _ = std::fs::remove_file(tmp_path);
    }
    result
}
