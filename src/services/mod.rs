pub mod copier;
pub mod scanner;

pub use copier::{copy_selected, CopyConfig, CopyError, CopyFailure, CopyReport};
pub use scanner::{scan_status_media, ScanConfig, ScanError};
