pub mod models;
pub mod services;
pub mod session;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use models::{selected_items, MediaItem, MediaKind};
pub use services::{
    copy_selected, scan_status_media, CopyConfig, CopyError, CopyFailure, CopyReport, ScanConfig,
    ScanError,
};
pub use session::{CopyCompletion, SessionError, StatusSession};
pub use storage::StorageLocations;

// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scan: ScanConfig,
    pub copy: CopyConfig,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            copy: CopyConfig::default(),
            log_level: "info".to_string(),
        }
    }
}
