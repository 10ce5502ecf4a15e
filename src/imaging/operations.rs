//! Thumbnail planning and execution.
//!
//! [`plan_thumbnail`] turns source dimensions and a [`ThumbnailConfig`] into a
//! [`ResizeParams`] without touching pixels; [`create_thumbnail`] identifies
//! the source, plans, and hands the params to an [`ImageBackend`].

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_width_resize;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, BackendError>;

/// JPEG encoding quality, always within 1..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    /// Out-of-range values are clamped.
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// One planned resize: read `source`, scale to exactly `width`x`height`,
/// write `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}

/// Configuration for thumbnail generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailConfig {
    pub width: u32,
    pub quality: Quality,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: 400,
            quality: Quality::default(),
        }
    }
}

/// Plan a thumbnail operation without executing it.
pub fn plan_thumbnail(
    source: &Path,
    output: &Path,
    original: Dimensions,
    config: &ThumbnailConfig,
) -> ResizeParams {
    let (width, height) =
        calculate_width_resize((original.width, original.height), config.width);

    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality: config.quality,
    }
}

/// Create a thumbnail of `source` at `output`.
///
/// Identifies the source, plans the target size, and resizes. Returns the
/// thumbnail's dimensions.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &ThumbnailConfig,
) -> Result<Dimensions> {
    let original = backend.identify(source)?;
    let params = plan_thumbnail(source, output, original, config);
    backend.resize(&params)?;
    Ok(Dimensions {
        width: params.width,
        height: params.height,
    })
}
