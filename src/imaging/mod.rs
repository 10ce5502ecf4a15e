//! Image processing: pure Rust via the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions`, format sniffed from content |
//! | **Resize** | `DynamicImage::resize_exact` with Lanczos3 |
//! | **Encode** | by output extension: JPEG (quality), PNG, WebP (lossless), GIF |
//!
//! - `calculations`: width-bounded resize math, no I/O
//! - `backend`: the [`ImageBackend`] seam (and a recording mock for tests)
//! - `rust_backend`: [`RustBackend`], the `image` crate implementation
//! - `operations`: [`Quality`], [`ResizeParams`] and thumbnail planning

pub mod backend;
mod calculations;
pub mod operations;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::calculate_width_resize;
pub use operations::{Quality, ResizeParams, ThumbnailConfig, create_thumbnail, plan_thumbnail};
pub use rust_backend::RustBackend;
