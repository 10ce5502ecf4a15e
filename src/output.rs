//! CLI output formatting for all pipeline stages.
//!
//! # Output Format
//!
//! ```text
//! Scanning /home/me/photos
//!     2 images
//! Thumbnails
//!     001 a.JPG: 400x267
//!     002 b.png: cached
//!     003 bad.gif: failed (Processing failed: ...)
//! Archive
//!     /home/me/photos.zip (1.2 MB)
//! Gallery
//!     /home/me/gallery.html (2 images, with download link)
//!
//! Ready! HTML generated: /home/me/gallery.html
//! ```
//!
//! # Architecture
//!
//! Each event has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::pipeline::{GalleryReport, ProgressEvent, RunOutcome};
use crate::process::ThumbnailStatus;

pub const NO_IMAGES_MESSAGE: &str = "No images found in the specified directory.";

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte size with one decimal above 1 KB.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn status_label(status: &ThumbnailStatus) -> String {
    match status {
        ThumbnailStatus::Generated { width, height } => format!("{width}x{height}"),
        ThumbnailStatus::Skipped => "cached".to_string(),
        ThumbnailStatus::Failed(reason) => format!("failed ({reason})"),
    }
}

/// Format one progress event.
///
/// The first thumbnail event also prints the `Thumbnails` section header.
pub fn format_event(event: &ProgressEvent) -> Vec<String> {
    match event {
        ProgressEvent::Scanned {
            folder,
            image_count,
        } => vec![
            format!("Scanning {}", folder.display()),
            format!("{}{}", indent(1), plural(*image_count, "image")),
        ],
        ProgressEvent::Thumbnail {
            index,
            filename,
            status,
            ..
        } => {
            let mut lines = Vec::new();
            if *index == 1 {
                lines.push("Thumbnails".to_string());
            }
            lines.push(format!(
                "{}{} {}: {}",
                indent(1),
                format_index(*index),
                filename,
                status_label(status)
            ));
            lines
        }
        ProgressEvent::ArchiveStarted { .. } => vec!["Archive".to_string()],
        ProgressEvent::Archived { path, bytes } => vec![format!(
            "{}{} ({})",
            indent(1),
            path.display(),
            format_bytes(*bytes)
        )],
        ProgressEvent::ArchiveFailed { error } => vec![
            format!("{}failed: {}", indent(1), error),
            format!("{}continuing without download link", indent(1)),
        ],
        ProgressEvent::Rendered {
            path,
            image_count,
            with_download,
        } => {
            let download = if *with_download {
                "with download link"
            } else {
                "no download link"
            };
            vec![
                "Gallery".to_string(),
                format!(
                    "{}{} ({}, {})",
                    indent(1),
                    path.display(),
                    plural(*image_count, "image"),
                    download
                ),
            ]
        }
    }
}

pub fn print_event(event: &ProgressEvent) {
    for line in format_event(event) {
        println!("{}", line);
    }
}

/// Format the closing summary of a run.
pub fn format_outcome(outcome: &RunOutcome) -> Vec<String> {
    match outcome {
        RunOutcome::NoImages => vec![NO_IMAGES_MESSAGE.to_string()],
        RunOutcome::Built(report) => format_report(report),
    }
}

fn format_report(report: &GalleryReport) -> Vec<String> {
    let mut lines = vec![String::new()];
    let failed = report.thumbnails.failed();
    if failed > 0 {
        lines.push(format!(
            "Warning: {} could not be processed",
            plural(failed, "image")
        ));
    }
    if let Some(error) = &report.archive_error {
        lines.push(format!("Warning: archive not created: {error}"));
    }
    lines.push(format!(
        "Ready! HTML generated: {}",
        report.layout.html_path.display()
    ));
    lines
}

pub fn print_outcome(outcome: &RunOutcome) {
    for line in format_outcome(outcome) {
        println!("{}", line);
    }
}
