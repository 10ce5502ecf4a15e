//! Shared test utilities: synthetic images and photo folder fixtures.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let folder = setup_photo_folder(tmp.path(), "photos");
//! // photos/a.JPG (300x200), photos/b.png (100x150), photos/notes.txt
//! ```

use std::path::{Path, PathBuf};

use image::{ImageEncoder, RgbImage, RgbaImage};

// =========================================================================
// Synthetic images
// =========================================================================

/// Write a small valid JPEG with a gradient so encoders have real content.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a small valid PNG with a translucent alpha channel.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, 64, (y % 256) as u8, 200])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Create `<parent>/<name>/` holding `a.JPG` (300x200), `b.png` (100x150)
/// and `notes.txt`. Returns the folder path.
pub fn setup_photo_folder(parent: &Path, name: &str) -> PathBuf {
    let folder = parent.join(name);
    std::fs::create_dir_all(&folder).unwrap();
    create_test_jpeg(&folder.join("a.JPG"), 300, 200);
    create_test_png(&folder.join("b.png"), 100, 150);
    std::fs::write(folder.join("notes.txt"), "trip notes").unwrap();
    folder
}

/// Names of all entries in a zip archive, in archive order.
pub fn zip_entry_names(path: &Path) -> Vec<String> {
    let file = std::fs::File::open(path).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    archive.file_names().map(str::to_string).collect()
}
