pub mod locations;

pub use locations::{
    resolve_status_dir, StorageLocations, DOWNLOAD_DIR_ENV, EXTERNAL_STORAGE_ENV, STATUS_DIR_ENV,
};
