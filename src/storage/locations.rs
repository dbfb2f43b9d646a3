use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Direct override for the status source directory.
pub const STATUS_DIR_ENV: &str = "STATUS_SAVER_STATUS_DIR";
/// Direct override for the download destination directory.
pub const DOWNLOAD_DIR_ENV: &str = "STATUS_SAVER_DOWNLOAD_DIR";
/// Root of the device's shared storage, set by the platform shell.
pub const EXTERNAL_STORAGE_ENV: &str = "EXTERNAL_STORAGE";

// WhatsApp status folder under scoped storage (Android 11+).
const SCOPED_STATUS_SUBDIR: &str = "Android/media/com.whatsapp/WhatsApp/Media/.Statuses";
// Pre-scoped-storage location, still used by older installs.
const LEGACY_STATUS_SUBDIR: &str = "WhatsApp/Media/.Statuses";
const DOWNLOAD_SUBDIR: &str = "Download";

/// Resolved source and destination folders for one device.
///
/// Stands in for the platform storage resolver: the host either injects both
/// paths directly or lets them derive from the external storage root.
#[derive(Debug, Clone)]
pub struct StorageLocations {
    pub status_dir: PathBuf,
    pub download_dir: PathBuf,
}

impl StorageLocations {
    pub fn new(status_dir: PathBuf, download_dir: PathBuf) -> Self {
        Self {
            status_dir,
            download_dir,
        }
    }

    /// Resolve both locations from the process environment.
    pub fn from_env() -> Result<Self> {
        let status_override = env::var_os(STATUS_DIR_ENV).map(PathBuf::from);
        let download_override = env::var_os(DOWNLOAD_DIR_ENV).map(PathBuf::from);
        let external_root = env::var_os(EXTERNAL_STORAGE_ENV).map(PathBuf::from);

        Self::from_parts(status_override, download_override, external_root)
    }

    /// Combine explicit overrides with the external storage root.
    /// Pure function apart from the filesystem probe for the legacy path.
    pub fn from_parts(
        status_override: Option<PathBuf>,
        download_override: Option<PathBuf>,
        external_root: Option<PathBuf>,
    ) -> Result<Self> {
        if let (Some(status_dir), Some(download_dir)) =
            (status_override.clone(), download_override.clone())
        {
            return Ok(Self::new(status_dir, download_dir));
        }

        let root = external_root.with_context(|| {
            format!(
                "{} is not set and no explicit directories were given via {} / {}",
                EXTERNAL_STORAGE_ENV, STATUS_DIR_ENV, DOWNLOAD_DIR_ENV
            )
        })?;

        let status_dir = status_override.unwrap_or_else(|| resolve_status_dir(&root));
        let download_dir = download_override.unwrap_or_else(|| root.join(DOWNLOAD_SUBDIR));

        Ok(Self::new(status_dir, download_dir))
    }
}

/// Pick the status folder under a storage root, preferring the scoped
/// (Android 11+) path and falling back to the legacy one only when the
/// scoped folder is absent but the legacy folder exists.
pub fn resolve_status_dir(root: &Path) -> PathBuf {
    let scoped = root.join(SCOPED_STATUS_SUBDIR);
    if scoped.exists() {
        return scoped;
    }

    let legacy = root.join(LEGACY_STATUS_SUBDIR);
    if legacy.exists() {
        debug!("Using legacy status folder: {}", legacy.display());
        legacy
    } else {
        scoped
    }
}
