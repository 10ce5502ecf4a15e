//! Pipeline driver: runs the four stages in order for one request.
//!
//! ```text
//! resolve layout → scan → thumbnails → archive (optional) → render
//! ```
//!
//! Stages run sequentially on the calling thread. Progress is reported as
//! [`ProgressEvent`]s over an optional channel so the CLI can print while the
//! run is in progress; [`crate::output`] turns events into lines.
//!
//! ## What stops a run
//!
//! | Stage | On error |
//! |---|---|
//! | resolve / scan | fatal ([`PipelineError::Scan`]) |
//! | thumbnail of one image | reported, image left out of the page |
//! | thumbnail directory creation | fatal ([`PipelineError::Process`]) |
//! | archive | reported, page rendered without download link |
//! | render / write | fatal ([`PipelineError::Generate`]) |
//!
//! A folder with no images ends the run before anything is written and yields
//! [`RunOutcome::NoImages`].

use crate::archive::{ArchiveSummary, archive_folder};
use crate::config::GalleryConfig;
use crate::generate::{GenerateError, RenderContext, write_gallery};
use crate::imaging::ImageBackend;
use crate::process::{
    ProcessError, ThumbnailReport, ThumbnailStatus, generate_thumbnails, thumbnail_config,
};
use crate::scan::{ScanError, scan_folder};
use crate::types::{GalleryRequest, OutputLayout};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Progress reported while a run is underway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Scanned {
        folder: PathBuf,
        image_count: usize,
    },
    Thumbnail {
        index: usize,
        total: usize,
        filename: String,
        status: ThumbnailStatus,
    },
    ArchiveStarted {
        target: PathBuf,
    },
    Archived {
        path: PathBuf,
        bytes: u64,
    },
    ArchiveFailed {
        error: String,
    },
    Rendered {
        path: PathBuf,
        image_count: usize,
        with_download: bool,
    },
}

/// Send `event` if a listener is attached. A hung-up receiver is ignored.
pub fn emit(events: Option<&Sender<ProgressEvent>>, event: ProgressEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

/// Summary of a completed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryReport {
    pub layout: OutputLayout,
    pub thumbnails: ThumbnailReport,
    pub archive: Option<ArchiveSummary>,
    /// Set when archiving was attempted and failed.
    pub archive_error: Option<String>,
    /// Images listed in the page, in display order.
    pub rendered: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The folder held no supported images; nothing was written.
    NoImages,
    Built(GalleryReport),
}

/// Run the whole pipeline for `request`.
///
/// `cwd` anchors relative folders and is the output directory when
/// `output.root = "cwd"`.
pub fn run(
    request: &GalleryRequest,
    config: &GalleryConfig,
    backend: &impl ImageBackend,
    cwd: &Path,
    events: Option<&Sender<ProgressEvent>>,
) -> Result<RunOutcome, PipelineError> {
    let layout = OutputLayout::resolve(request, config, cwd)?;
    log::info!(
        "gallery for {} → {}",
        layout.source_dir.display(),
        layout.output_dir.display()
    );
    if !layout.links_resolve() {
        log::warn!(
            "full-size links point at {}/, which is not next to {}",
            layout.folder_name,
            layout.html_path.display()
        );
    }

    let entries = scan_folder(&layout.source_dir)?;
    emit(
        events,
        ProgressEvent::Scanned {
            folder: layout.source_dir.clone(),
            image_count: entries.len(),
        },
    );
    if entries.is_empty() {
        return Ok(RunOutcome::NoImages);
    }

    let thumbnails = generate_thumbnails(
        backend,
        &entries,
        &layout.source_dir,
        &layout.thumbnail_dir,
        &thumbnail_config(config),
        events,
    )?;

    let (archive, archive_error) = if request.archive && config.archive.enabled {
        match build_archive(&layout, config, events) {
            Ok(summary) => (Some(summary), None),
            Err(error) => (None, Some(error)),
        }
    } else {
        (None, None)
    };

    let rendered: Vec<String> = entries
        .into_iter()
        .map(|e| e.filename)
        .filter(|name| config.thumbnails.keep_failed || !thumbnails.is_failed(name))
        .collect();

    let ctx = RenderContext {
        title: request.title.clone(),
        images: rendered.clone(),
        folder_name: layout.folder_name.clone(),
        archive_name: archive.as_ref().map(|_| config.archive.filename.clone()),
    };
    write_gallery(&ctx, &layout.html_path)?;
    emit(
        events,
        ProgressEvent::Rendered {
            path: layout.html_path.clone(),
            image_count: rendered.len(),
            with_download: ctx.archive_name.is_some(),
        },
    );

    Ok(RunOutcome::Built(GalleryReport {
        layout,
        thumbnails,
        archive,
        archive_error,
        rendered,
    }))
}

/// Archive the source folder, reporting but not propagating failure.
fn build_archive(
    layout: &OutputLayout,
    config: &GalleryConfig,
    events: Option<&Sender<ProgressEvent>>,
) -> Result<ArchiveSummary, String> {
    emit(
        events,
        ProgressEvent::ArchiveStarted {
            target: layout.archive_path.clone(),
        },
    );
    // Only matters when artifacts land inside the source folder
    let exclude = [layout.thumbnail_dir.clone(), layout.html_path.clone()];

    match archive_folder(
        &layout.source_dir,
        &layout.archive_path,
        config.archive.strategy,
        &exclude,
    ) {
        Ok(summary) => {
            emit(
                events,
                ProgressEvent::Archived {
                    path: summary.path.clone(),
                    bytes: summary.bytes,
                },
            );
            Ok(summary)
        }
        Err(e) => {
            log::warn!("archive failed: {e}");
            let error = e.to_string();
            emit(
                events,
                ProgressEvent::ArchiveFailed {
                    error: error.clone(),
                },
            );
            Err(error)
        }
    }
}
