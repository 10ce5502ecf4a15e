//! # snapgal
//!
//! Turns one folder of photos into a single-page HTML gallery with a
//! click-to-zoom lightbox, a thumbnail grid and an optional zip of the
//! originals. The output is plain files next to the folder; open the HTML in
//! any browser or drop the lot on a file server.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! ```text
//! 1. Scan        photos/      →  [a.JPG, b.png]       (direct children, image extensions)
//! 2. Thumbnails  [entries]    →  thumbnails/           (width-bounded resize, same names)
//! 3. Archive     photos/      →  photos.zip            (optional, whole folder)
//! 4. Render      context      →  gallery.html          (Maud template + embedded lightbox)
//! ```
//!
//! [`pipeline::run`] drives the stages in order for one
//! [`GalleryRequest`](types::GalleryRequest). Only thumbnails and the archive
//! degrade gracefully; everything else is fatal.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: lists supported images in the folder |
//! | [`process`] | Stage 2: thumbnails, skipping ones already on disk |
//! | [`archive`] | Stage 3: zip via `zip::ZipWriter` or the external `zip` command |
//! | [`generate`] | Stage 4: renders the gallery page using Maud |
//! | [`pipeline`] | Runs the stages, emits progress events |
//! | [`config`] | `config.toml` loading, merging onto stock defaults, validation |
//! | [`types`] | Request and resolved output layout shared by the stages |
//! | [`imaging`] | Pure-Rust image operations: identify, resize, encode |
//! | [`output`] | CLI output formatting of progress events |
//!
//! # Design Decisions
//!
//! ## Thumbnails Keep Their Names and Formats
//!
//! `thumbnails/a.JPG` is a JPEG, `thumbnails/b.png` a PNG. The page derives
//! both URLs from the file name alone, so nothing maps one to the other.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup is
//! a build error and every interpolated file name is escaped.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling). No
//! ImageMagick, no system libraries; the external `zip` command is the only
//! optional outside tool, and the built-in archiver is the default.

pub mod archive;
pub mod config;
pub mod generate;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
