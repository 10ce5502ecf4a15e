//! Folder scanning.
//!
//! Stage 1 of the pipeline. Lists the direct children of the image folder and
//! keeps the ones that look like images:
//!
//! ```text
//! photos/
//! ├── a.JPG          ✓  (extension match is case-insensitive)
//! ├── b.png          ✓
//! ├── notes.txt      ✗  unsupported extension
//! └── raw/           ✗  subdirectories are skipped, not recursed
//!     └── c.jpg
//! ```
//!
//! An empty result is not an error: it means there is nothing to build.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Image file extensions the gallery picks up (compared lowercase).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// An image file directly inside the source folder.
///
/// Holds the bare file name; paths are rebuilt from the
/// [`OutputLayout`](crate::types::OutputLayout) where needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub filename: String,
}

impl ImageEntry {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// Whether `path` has one of the [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// List the image files directly inside `dir`, sorted by file name.
///
/// Fails with [`ScanError::NotADirectory`] if `dir` is missing or is a file.
/// Symlinks to files count as files, the same as in the archive.
/// Entries whose names are not valid UTF-8 are skipped (they could not be
/// written into the page as text anyway).
pub fn scan_folder(dir: &Path) -> Result<Vec<ImageEntry>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type()?.is_file() && !path.is_file() {
            log::debug!("skipping non-file entry {}", path.display());
            continue;
        }
        if !is_supported_image(&path) {
            log::debug!("skipping non-image {}", path.display());
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => entries.push(ImageEntry::new(name)),
            Err(name) => log::warn!("skipping non UTF-8 file name {:?}", name),
        }
    }

    entries.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(entries)
}
