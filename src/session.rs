use crate::models::MediaItem;
use crate::services::{copy_selected, scan_status_media, CopyError, CopyReport, ScanError};
use crate::storage::StorageLocations;
use crate::AppConfig;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::info;

/// Session-level failures, reported to the user immediately. Each one aborts
/// the operation that raised it.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("no status files found in {}", .path.display())]
    NoFilesFound { path: PathBuf },

    #[error("no status files selected")]
    NothingSelected,

    #[error("a copy batch is already in flight")]
    BatchInFlight,

    #[error("no status item at index {index}")]
    UnknownItem { index: usize },
}

/// Receives the batch report once the background copy finishes.
pub type CopyCompletion = oneshot::Receiver<Result<CopyReport, CopyError>>;

/// Host-facing state for one saver screen: the current scan result, its
/// selection flags, and the single-batch copy trigger.
///
/// The session holds no UI references; the host wires its checkbox and
/// button callbacks to `set_selected` and `start_copy`, and polls
/// `copy_available` to keep the copy control disabled while a batch runs.
pub struct StatusSession {
    locations: StorageLocations,
    config: AppConfig,
    items: Vec<MediaItem>,
    copy_in_flight: Arc<AtomicBool>,
}

impl StatusSession {
    pub fn new(locations: StorageLocations, config: AppConfig) -> Self {
        Self {
            locations,
            config,
            items: Vec::new(),
            copy_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn locations(&self) -> &StorageLocations {
        &self.locations
    }

    /// The "scan" trigger. Discards the previous result set, selections
    /// included, before scanning; a scan that finds nothing leaves the
    /// session empty and reports `NoFilesFound`.
    pub fn refresh(&mut self) -> Result<&[MediaItem], SessionError> {
        self.items.clear();

        let items = scan_status_media(&self.locations.status_dir, &self.config.scan)?;
        if items.is_empty() {
            return Err(SessionError::NoFilesFound {
                path: self.locations.status_dir.clone(),
            });
        }

        self.items = items;
        Ok(&self.items)
    }

    /// The checkbox callback.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> Result<(), SessionError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(SessionError::UnknownItem { index })?;
        item.selected = selected;
        Ok(())
    }

    pub fn select_all(&mut self) {
        for item in &mut self.items {
            item.selected = true;
        }
    }

    pub fn clear_selection(&mut self) {
        for item in &mut self.items {
            item.selected = false;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|item| item.selected).count()
    }

    pub fn copy_in_flight(&self) -> bool {
        self.copy_in_flight.load(Ordering::SeqCst)
    }

    /// Whether the host should enable its copy control: something is
    /// selected and no batch is running.
    pub fn copy_available(&self) -> bool {
        self.selected_count() > 0 && !self.copy_in_flight()
    }

    /// The "copy selected" trigger. Non-blocking: snapshots the current
    /// selection, spawns the batch on the runtime, and hands back a
    /// completion receiver. Only one batch may run at a time.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_copy(&mut self) -> Result<CopyCompletion, SessionError> {
        if self.copy_in_flight() {
            return Err(SessionError::BatchInFlight);
        }
        if self.selected_count() == 0 {
            return Err(SessionError::NothingSelected);
        }

        let snapshot = self.items.clone();
        let destination = self.locations.download_dir.clone();
        let copy_config = self.config.copy.clone();
        let in_flight = Arc::clone(&self.copy_in_flight);

        in_flight.store(true, Ordering::SeqCst);
        info!(
            "Dispatching copy batch: {} of {} items selected",
            self.selected_count(),
            self.items.len()
        );

        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = copy_selected(&snapshot, &destination, &copy_config).await;
            // The flag must already read false when the completion fires.
            in_flight.store(false, Ordering::SeqCst);
            let _ = tx.send(result);
        });

        Ok(rx)
    }
}
