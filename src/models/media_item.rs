use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::metadata_to_datetime;

/// What kind of media a status file holds, judged by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Unknown,
}

impl MediaKind {
    /// Pure function to classify a path by extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") | Some("png") => MediaKind::Image,
            Some("mp4") => MediaKind::Video,
            _ => MediaKind::Unknown,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A discovered status file plus its selection flag.
///
/// Items live exactly as long as one scan result set; the next scan discards
/// them, selection flags included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: MediaKind,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
    pub selected: bool,
}

impl MediaItem {
    /// Build an item from a discovered path, reading size and mtime from
    /// filesystem metadata. Fresh items are never selected.
    pub fn from_path(path: PathBuf) -> Result<Self> {
        let metadata = fs::metadata(&path)
            .with_context(|| format!("Failed to read metadata for: {:?}", path))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            kind: MediaKind::from_path(&path),
            file_name,
            size_bytes: metadata.len(),
            modified_at: metadata_to_datetime(metadata.modified().ok()),
            selected: false,
            path,
        })
    }
}

/// Snapshot the currently selected items out of a scan result.
/// Pure function.
pub fn selected_items(items: &[MediaItem]) -> Vec<MediaItem> {
    items.iter().filter(|item| item.selected).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(MediaKind::from_path(Path::new("a.jpg")), MediaKind::Image);
        assert_eq!(MediaKind::from_path(Path::new("a.JPEG")), MediaKind::Image);
        assert_eq!(MediaKind::from_path(Path::new("a.png")), MediaKind::Image);
        assert_eq!(MediaKind::from_path(Path::new("a.mp4")), MediaKind::Video);
        assert_eq!(MediaKind::from_path(Path::new("a.txt")), MediaKind::Unknown);
        assert_eq!(MediaKind::from_path(Path::new("a")), MediaKind::Unknown);
    }

    #[test]
    fn test_from_path_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.jpg");
        std::fs::write(&path, b"12345").unwrap();

        let item = MediaItem::from_path(path.clone()).unwrap();
        assert_eq!(item.file_name, "status.jpg");
        assert_eq!(item.kind, MediaKind::Image);
        assert_eq!(item.size_bytes, 5);
        assert!(!item.selected);
        assert_eq!(item.path, path);
    }

    #[test]
    fn test_selected_items_filters() {
        let dir = tempfile::tempdir().unwrap();
        let mut items = Vec::new();
        for name in ["a.jpg", "b.mp4", "c.png"] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"x").unwrap();
            items.push(MediaItem::from_path(path).unwrap());
        }
        items[1].selected = true;

        let selected = selected_items(&items);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].file_name, "b.mp4");
    }
}
