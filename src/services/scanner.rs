use crate::models::MediaItem;
use crate::utils::list_files_with_extensions;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Configuration for status discovery
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub allowed_extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: vec![
                ".jpg".to_string(),
                ".jpeg".to_string(),
                ".png".to_string(),
                ".mp4".to_string(),
            ],
        }
    }
}

/// Errors that abort a scan outright.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("status directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read status directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Discover status media in a directory.
///
/// Returns items in file-name order, none of them selected. An empty result
/// is a valid outcome; the caller decides whether to surface it as a
/// no-files-found notice. A file whose metadata cannot be read is skipped
/// with a warning rather than failing the scan.
pub fn scan_status_media(
    directory: &Path,
    config: &ScanConfig,
) -> Result<Vec<MediaItem>, ScanError> {
    if !directory.exists() {
        return Err(ScanError::DirectoryNotFound {
            path: directory.to_path_buf(),
        });
    }

    let files = list_files_with_extensions(directory, &config.allowed_extensions).map_err(
        |source| ScanError::Directory {
            path: directory.to_path_buf(),
            source,
        },
    )?;

    let mut items = Vec::with_capacity(files.len());
    for path in files {
        match MediaItem::from_path(path) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!("Skipping unreadable status file: {:#}", e);
            }
        }
    }

    info!(
        "Discovered {} status files in {}",
        items.len(),
        directory.display()
    );

    Ok(items)
}
