pub mod media_item;

pub use media_item::{selected_items, MediaItem, MediaKind};
