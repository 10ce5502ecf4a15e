//! Gallery configuration.
//!
//! One structure parameterizes the whole pipeline: thumbnail width and
//! quality, where generated artifacts land, and how the source folder is
//! archived. Values come from three layers, later layers winning:
//!
//! ```text
//! stock defaults  →  --config file.toml  →  command-line flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [thumbnails]
//! width = 400            # Target thumbnail width in pixels
//! quality = 85           # JPEG encoding quality (1-100)
//! keep_failed = false    # List images whose thumbnail failed anyway
//!
//! [output]
//! root = "parent"        # "parent" (beside the folder) or "cwd"
//!
//! [archive]
//! enabled = true
//! strategy = "builtin"   # "builtin" (zip crate) or "external" (zip binary)
//! filename = "photos.zip"
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration.
///
/// All fields have defaults matching the plain `snapgal <folder>` behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Thumbnail generation settings.
    pub thumbnails: ThumbnailsConfig,
    /// Placement of generated artifacts.
    pub output: OutputConfig,
    /// Zip archive of the source folder.
    pub archive: ArchiveConfig,
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.width == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.width must be greater than 0".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnails.quality) {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 1-100".into(),
            ));
        }
        let name = self.archive.filename.as_str();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "archive.filename must be a plain file name".into(),
            ));
        }
        Ok(())
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Target width in pixels. Height follows the source aspect ratio.
    pub width: u32,
    /// JPEG quality (1 = worst, 100 = best). Other formats ignore it.
    pub quality: u32,
    /// Keep images whose thumbnail could not be produced in the gallery list.
    pub keep_failed: bool,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            width: 400,
            quality: 85,
            keep_failed: false,
        }
    }
}

/// Where the thumbnail directory, archive, and HTML file are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputRoot {
    /// The parent directory of the image folder (artifacts sit beside it).
    #[default]
    Parent,
    /// The current working directory.
    Cwd,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub root: OutputRoot,
}

/// How the source folder gets zipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveStrategy {
    /// In-process writer, no external dependency.
    #[default]
    Builtin,
    /// Shell out to a `zip` binary found on `PATH`.
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    pub enabled: bool,
    pub strategy: ArchiveStrategy,
    /// File name of the archive inside the output directory.
    pub filename: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strategy: ArchiveStrategy::default(),
            filename: "photos.zip".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a config file, or the stock defaults when `path` is `None`.
///
/// An explicitly named file that does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<GalleryConfig, ConfigError> {
    let overlay = match path {
        Some(p) => {
            let content = fs::read_to_string(p)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Printed by `snapgal --gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# snapgal configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override this file.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Target width in pixels. Height keeps the source aspect ratio.
# Images narrower than this keep their width (no upscaling).
# 400 suits a dense grid; 1000 suits large single-column layouts.
width = 400

# JPEG quality (1 = worst, 100 = best). PNG, WebP and GIF are lossless.
quality = 85

# When a thumbnail cannot be produced the image is left out of the page.
# Set to true to list it anyway (its thumbnail link will be broken).
keep_failed = false

# ---------------------------------------------------------------------------
# Output placement
# ---------------------------------------------------------------------------
[output]
# "parent": write thumbnails/, the archive and the HTML beside the folder.
# "cwd":    write them into the current working directory.
root = "parent"

# ---------------------------------------------------------------------------
# Archive
# ---------------------------------------------------------------------------
[archive]
# Zip the whole image folder and link it from the page.
enabled = true

# "builtin":  in-process zip writer.
# "external": run the `zip` command (must be installed).
strategy = "builtin"

# Archive file name, written to the output directory.
filename = "photos.zip"
"##
}
