use crate::models::{selected_items, MediaItem};
use crate::utils::copy_file_preserving;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Configuration for selective copy batches
#[derive(Debug, Clone)]
pub struct CopyConfig {
    pub preserve_timestamps: bool,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            preserve_timestamps: true,
        }
    }
}

/// Batch-level copy failures. Per-file failures never end up here; they are
/// collected in the report instead.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("no status files selected")]
    NothingSelected,

    #[error("copy worker failed: {0}")]
    Worker(String),
}

/// One file that could not be copied, with the reason kept as text for the
/// host to display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyFailure {
    pub file_name: String,
    pub reason: String,
}

/// Final summary of a copy batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyReport {
    pub batch_id: Uuid,
    pub succeeded: usize,
    pub failed: Vec<CopyFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CopyReport {
    pub fn total_processed(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.total_processed();
        if total == 0 {
            0.0
        } else {
            self.succeeded as f64 / total as f64
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Copy the selected items into the destination directory.
///
/// The filesystem loop runs on a blocking worker so the calling task stays
/// responsive. Each item is copied to `destination/<file_name>`, overwriting
/// any existing file there; one item's failure never aborts the batch.
pub async fn copy_selected(
    items: &[MediaItem],
    destination: &Path,
    config: &CopyConfig,
) -> Result<CopyReport, CopyError> {
    let selected = selected_items(items);
    if selected.is_empty() {
        return Err(CopyError::NothingSelected);
    }

    let batch_id = Uuid::new_v4();
    info!(
        "Starting copy batch {} with {} files to {}",
        batch_id,
        selected.len(),
        destination.display()
    );

    let destination = destination.to_path_buf();
    let config = config.clone();

    let report = tokio::task::spawn_blocking(move || {
        copy_batch(batch_id, &selected, &destination, &config)
    })
    .await
    .map_err(|e| CopyError::Worker(e.to_string()))?;

    info!(
        "Copy batch {} finished: {} copied, {} failed",
        batch_id,
        report.succeeded,
        report.failed.len()
    );

    Ok(report)
}

/// Sequential per-file copy loop; collects failures instead of propagating.
fn copy_batch(
    batch_id: Uuid,
    items: &[MediaItem],
    destination: &Path,
    config: &CopyConfig,
) -> CopyReport {
    let started_at = Utc::now();
    let mut succeeded = 0;
    let mut failed = Vec::new();

    for item in items {
        let dest_path = destination.join(&item.file_name);
        match copy_file_preserving(&item.path, &dest_path, config.preserve_timestamps) {
            Ok(()) => {
                succeeded += 1;
                debug!("Copied {} to {}", item.file_name, dest_path.display());
            }
            Err(e) => {
                error!("Failed to copy {}: {:#}", item.file_name, e);
                failed.push(CopyFailure {
                    file_name: item.file_name.clone(),
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    CopyReport {
        batch_id,
        succeeded,
        failed,
        started_at,
        finished_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scanner::{scan_status_media, ScanConfig};
    use std::fs;

    fn scanned_items(dir: &Path) -> Vec<MediaItem> {
        scan_status_media(dir, &ScanConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_nothing_selected_writes_nothing() {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::write(source.path().join("a.jpg"), b"image").unwrap();

        let items = scanned_items(source.path());
        let err = copy_selected(&items, dest.path(), &CopyConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CopyError::NothingSelected));
        assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_copies_only_selected() {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::write(source.path().join("a.jpg"), b"image a").unwrap();
        fs::write(source.path().join("b.mp4"), b"video b").unwrap();

        let mut items = scanned_items(source.path());
        items[0].selected = true;

        let report = copy_selected(&items, dest.path(), &CopyConfig::default())
            .await
            .unwrap();

        assert_eq!(report.succeeded, 1);
        assert!(report.all_succeeded());
        assert_eq!(fs::read(dest.path().join("a.jpg")).unwrap(), b"image a");
        assert!(!dest.path().join("b.mp4").exists());
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_batch() {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        for name in ["a.jpg", "b.mp4", "c.png"] {
            fs::write(source.path().join(name), b"media").unwrap();
        }

        let mut items = scanned_items(source.path());
        for item in &mut items {
            item.selected = true;
        }

        // Source vanishes between scan and copy.
        fs::remove_file(source.path().join("b.mp4")).unwrap();

        let report = copy_selected(&items, dest.path(), &CopyConfig::default())
            .await
            .unwrap();

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].file_name, "b.mp4");
        assert!(!report.failed[0].reason.is_empty());
        assert!(dest.path().join("a.jpg").exists());
        assert!(dest.path().join("c.png").exists());
    }

    #[tokio::test]
    async fn test_rerun_overwrites_destination() {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::write(source.path().join("a.jpg"), b"first").unwrap();

        let mut items = scanned_items(source.path());
        items[0].selected = true;

        copy_selected(&items, dest.path(), &CopyConfig::default())
            .await
            .unwrap();

        fs::write(source.path().join("a.jpg"), b"second").unwrap();
        let mut items = scanned_items(source.path());
        items[0].selected = true;

        let report = copy_selected(&items, dest.path(), &CopyConfig::default())
            .await
            .unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(fs::read(dest.path().join("a.jpg")).unwrap(), b"second");
    }

    #[test]
    fn test_report_rates() {
        let report = CopyReport {
            batch_id: Uuid::new_v4(),
            succeeded: 3,
            failed: vec![CopyFailure {
                file_name: "x.jpg".to_string(),
                reason: "gone".to_string(),
            }],
            started_at: Utc::now(),
            finished_at: Utc::now(),
        };

        assert_eq!(report.total_processed(), 4);
        assert!((report.success_rate() - 0.75).abs() < f64::EPSILON);
        assert!(!report.all_succeeded());
    }
}
