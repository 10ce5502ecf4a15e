//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::into_dimensions` (content-sniffed, header only) |
//! | Decode (JPEG, PNG, WebP, GIF) | `image::ImageReader` (content-sniffed) |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with quality, alpha dropped |
//! | Encode → PNG / WebP / GIF | `DynamicImage::save_with_format` (WebP is lossless) |
//!
//! Input formats are sniffed from the bytes, so a PNG saved as `.jpg` is still
//! read. The output format follows the output file's extension, so `b.png`
//! stays a PNG and `a.JPG` stays a JPEG.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::operations::ResizeParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
///
/// The format is sniffed from the content, so a PNG saved as `.jpg` still
/// decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode `img` to `path`, choosing the format from the extension.
fn save_image(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        BackendError::ProcessingFailed(format!("Unsupported output format: {}", path.display()))
    })?;

    let result = match format {
        ImageFormat::Jpeg => save_jpeg(img, path, quality),
        // The lossless WebP encoder only takes 8-bit RGB(A)
        ImageFormat::WebP => DynamicImage::ImageRgba8(img.to_rgba8())
            .save_with_format(path, format)
            .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {e}"))),
        ImageFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8())
            .save_with_format(path, format)
            .map_err(|e| BackendError::ProcessingFailed(format!("GIF encode failed: {e}"))),
        ImageFormat::Png => img
            .save_with_format(path, format)
            .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {e}"))),
        other => Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {other:?}"
        ))),
    };

    // A half-written file would count as an existing thumbnail on the next run
    if result.is_err() && path.exists() {
        let _ = std::fs::remove_file(path);
    }
    result
}

fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality as u8);
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {e}")))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
            })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_image(&resized, &params.output, params.quality.value())
    }
}
