//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the gallery needs:
//! identify and resize. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use a recording
//! mock so pipeline logic can be exercised without decoding pixels.

use super::operations::ResizeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `params.source`, resize to exactly `width`x`height`, and encode
    /// to `params.output` in the format its extension names.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}
