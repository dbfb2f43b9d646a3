use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// List plain files in a directory matching given extensions.
///
/// Flat listing only: subdirectories are never entered. The result is sorted
/// by file name so callers see a stable order regardless of readdir order.
pub fn list_files_with_extensions<P: AsRef<Path>>(
    directory: P,
    extensions: &[String],
) -> std::io::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(directory.as_ref())?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| matches_extensions(path, extensions))
        .collect();

    files.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));

    Ok(files)
}

/// Check if a file matches any of the given extensions.
/// Case-insensitive; accepts configured extensions with or without the dot.
/// Pure function.
pub fn matches_extensions(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext_with_dot = format!(".{}", ext);
            extensions.iter().any(|target_ext| {
                target_ext.eq_ignore_ascii_case(&ext_with_dot)
                    || target_ext.eq_ignore_ascii_case(ext)
            })
        })
        .unwrap_or(false)
}

/// Copy a file to its destination, overwriting whatever is already there.
///
/// When `preserve_timestamps` is set the source modification time is carried
/// over to the destination, matching what the host expects from a
/// media-preserving save.
pub fn copy_file_preserving<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    preserve_timestamps: bool,
) -> Result<()> {
    let src_path = source.as_ref();
    let dest_path = destination.as_ref();

    let metadata = fs::metadata(src_path)
        .with_context(|| format!("Failed to read metadata for: {:?}", src_path))?;

    fs::copy(src_path, dest_path).with_context(|| {
        format!(
            "Failed to copy file from {:?} to {:?}",
            src_path, dest_path
        )
    })?;

    if preserve_timestamps {
        if let Ok(modified) = metadata.modified() {
            let dest_file = fs::OpenOptions::new()
                .write(true)
                .open(dest_path)
                .with_context(|| format!("Failed to reopen destination: {:?}", dest_path))?;
            dest_file
                .set_modified(modified)
                .with_context(|| format!("Failed to set timestamps on: {:?}", dest_path))?;
        }
    }

    Ok(())
}

/// Convert system time to UTC DateTime
pub fn metadata_to_datetime(system_time: Option<std::time::SystemTime>) -> DateTime<Utc> {
    system_time
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| DateTime::from_timestamp_millis(d.as_millis() as i64).unwrap_or_default())
        .unwrap_or_else(Utc::now)
}
