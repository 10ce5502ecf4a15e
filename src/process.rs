//! Thumbnail generation.
//!
//! Stage 2 of the pipeline. For each scanned image, writes a resized copy
//! under the thumbnail directory using the original file name:
//!
//! ```text
//! photos/a.JPG   (4000x3000)  →  thumbnails/a.JPG   (400x300)
//! photos/b.png   (1000x1500)  →  thumbnails/b.png   (400x600)
//! ```
//!
//! ## Idempotence
//!
//! An image whose thumbnail file already exists is skipped without being
//! decoded, so re-running on an unchanged folder does no pixel work and leaves
//! existing thumbnails untouched. Delete `thumbnails/` to force regeneration.
//!
//! ## Failures
//!
//! A decode or encode error affects only that image: it is reported as a
//! [`ThumbnailStatus::Failed`] event, recorded in the [`ThumbnailReport`], and
//! processing moves on. Only failing to create the thumbnail directory itself
//! stops the stage.
//!
//! Images are processed one at a time, in scan order.

use crate::config::GalleryConfig;
use crate::imaging::{ImageBackend, Quality, ThumbnailConfig, create_thumbnail};
use crate::pipeline::{ProgressEvent, emit};
use crate::scan::ImageEntry;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Cannot create thumbnail directory {path}: {source}")]
    ThumbnailDir {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// What happened to one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailStatus {
    Generated { width: u32, height: u32 },
    /// A thumbnail with this name was already present.
    Skipped,
    Failed(String),
}

/// Per-image outcome of the thumbnail stage, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailReport {
    pub outcomes: Vec<(String, ThumbnailStatus)>,
}

impl ThumbnailReport {
    pub fn generated(&self) -> usize {
        self.count(|s| matches!(s, ThumbnailStatus::Generated { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, ThumbnailStatus::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, ThumbnailStatus::Failed(_)))
    }

    /// Whether `filename` has no usable thumbnail.
    pub fn is_failed(&self, filename: &str) -> bool {
        self.outcomes
            .iter()
            .any(|(name, status)| name == filename && matches!(status, ThumbnailStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&ThumbnailStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, s)| pred(s)).count()
    }
}

/// Build the imaging-level config from the gallery config.
pub fn thumbnail_config(config: &GalleryConfig) -> ThumbnailConfig {
    ThumbnailConfig {
        width: config.thumbnails.width,
        quality: Quality::new(config.thumbnails.quality),
    }
}

/// Generate thumbnails for `entries` from `source_dir` into `thumbnail_dir`.
///
/// Creates `thumbnail_dir` if needed. Emits one
/// [`ProgressEvent::Thumbnail`] per entry when `events` is set.
pub fn generate_thumbnails(
    backend: &impl ImageBackend,
    entries: &[ImageEntry],
    source_dir: &Path,
    thumbnail_dir: &Path,
    config: &ThumbnailConfig,
    events: Option<&Sender<ProgressEvent>>,
) -> Result<ThumbnailReport, ProcessError> {
    std::fs::create_dir_all(thumbnail_dir).map_err(|source| ProcessError::ThumbnailDir {
        path: thumbnail_dir.to_path_buf(),
        source,
    })?;

    let total = entries.len();
    let mut report = ThumbnailReport::default();

    for (i, entry) in entries.iter().enumerate() {
        let source = source_dir.join(&entry.filename);
        let output = thumbnail_dir.join(&entry.filename);

        let status = if output.exists() {
            log::debug!("thumbnail exists, skipping {}", output.display());
            ThumbnailStatus::Skipped
        } else {
            match create_thumbnail(backend, &source, &output, config) {
                Ok(dims) => ThumbnailStatus::Generated {
                    width: dims.width,
                    height: dims.height,
                },
                Err(e) => {
                    log::warn!("thumbnail failed for {}: {}", source.display(), e);
                    ThumbnailStatus::Failed(e.to_string())
                }
            }
        };

        emit(
            events,
            ProgressEvent::Thumbnail {
                index: i + 1,
                total,
                filename: entry.filename.clone(),
                status: status.clone(),
            },
        );
        report.outcomes.push((entry.filename.clone(), status));
    }

    Ok(report)
}
