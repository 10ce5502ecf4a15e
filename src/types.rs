//! Shared types passed between pipeline stages.

use crate::config::{GalleryConfig, OutputRoot};
use crate::scan::ScanError;
use std::path::{Path, PathBuf};

/// What the user asked for: one gallery from one folder.
///
/// Built once from command-line flags or interactive prompts and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryRequest {
    /// Image folder, as given (relative paths resolve against the cwd).
    pub folder: PathBuf,
    /// Page title, shown in `<title>` and the heading.
    pub title: String,
    /// HTML file name, written to the output directory.
    pub output_filename: String,
    /// Whether to zip the folder and link the archive.
    pub archive: bool,
}

impl GalleryRequest {
    pub const DEFAULT_TITLE: &'static str = "Photos";
    pub const DEFAULT_OUTPUT: &'static str = "gallery.html";

    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            title: Self::DEFAULT_TITLE.to_string(),
            output_filename: Self::DEFAULT_OUTPUT.to_string(),
            archive: true,
        }
    }
}

/// Resolved locations of everything a run reads or writes.
///
/// ```text
/// <output_dir>/
/// ├── <folder_name>/        # source images (when output root is the parent)
/// ├── thumbnails/           # thumbnail_dir
/// ├── photos.zip            # archive_path
/// └── gallery.html          # html_path
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Absolute, canonical source folder.
    pub source_dir: PathBuf,
    /// Base name of the source folder, used for full-size image links.
    pub folder_name: String,
    pub output_dir: PathBuf,
    pub thumbnail_dir: PathBuf,
    pub archive_path: PathBuf,
    pub html_path: PathBuf,
}

/// Name of the thumbnail directory inside the output directory.
pub const THUMBNAIL_DIR: &str = "thumbnails";

impl OutputLayout {
    /// Resolve every artifact path for `request`.
    ///
    /// The folder is canonicalized so a relative or `.`-style path still has
    /// a usable base name. Artifacts go next to the folder
    /// ([`OutputRoot::Parent`]) or into `cwd` ([`OutputRoot::Cwd`]).
    pub fn resolve(
        request: &GalleryRequest,
        config: &GalleryConfig,
        cwd: &Path,
    ) -> Result<Self, ScanError> {
        let folder = if request.folder.is_absolute() {
            request.folder.clone()
        } else {
            cwd.join(&request.folder)
        };
        if !folder.is_dir() {
            return Err(ScanError::NotADirectory(request.folder.clone()));
        }
        let source_dir = folder.canonicalize()?;

        let folder_name = source_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| ScanError::NotADirectory(source_dir.clone()))?;

        let output_dir = match config.output.root {
            OutputRoot::Parent => source_dir
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| source_dir.clone()),
            OutputRoot::Cwd => cwd.canonicalize().unwrap_or_else(|_| cwd.to_path_buf()),
        };

        Ok(Self {
            thumbnail_dir: output_dir.join(THUMBNAIL_DIR),
            archive_path: output_dir.join(&config.archive.filename),
            html_path: output_dir.join(&request.output_filename),
            source_dir,
            folder_name,
            output_dir,
        })
    }

    /// Whether the full-size links `<folder_name>/<file>` resolve from the
    /// page's directory.
    pub fn links_resolve(&self) -> bool {
        self.source_dir.parent() == Some(self.output_dir.as_path())
    }
}
