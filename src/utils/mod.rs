pub mod fs_ops;

pub use fs_ops::{
    copy_file_preserving, list_files_with_extensions, matches_extensions, metadata_to_datetime,
};
