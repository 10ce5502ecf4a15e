//! HTML gallery generation.
//!
//! Stage 4 of the pipeline, and the final consumer: renders one self-contained
//! HTML page from a [`RenderContext`].
//!
//! ## Page Structure
//!
//! ```text
//! <h1>Title</h1>
//! <div class="download-link"><a href="photos.zip">…</a></div>   (only with an archive)
//! <section class="gallery">
//!   <div class="gallery-item">
//!     <img class="zoomable" src="thumbnails/a.JPG" data-full="photos/a.JPG" …>
//!   </div>
//!   …
//! </section>
//! <div id="lightbox" class="lightbox">…</div>
//! ```
//!
//! ## Lightbox
//!
//! The viewer is static CSS and JavaScript embedded at compile time:
//! - `static/gallery.css`: masonry columns and the lightbox overlay
//! - `static/lightbox.js`: click-to-zoom, prev/next with wraparound,
//!   Escape/arrow keys, click-outside-to-close
//!
//! The script binds to the `zoomable` class and reads each element's
//! `data-full` attribute in document order; the markup below must keep those
//! hooks.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every interpolated value (title, file names, folder name) is escaped, so
//! a file called `"><script>.jpg` renders as text.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Cannot write {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Everything the page needs. Built after thumbnails and archiving finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub title: String,
    /// Image file names, in display order.
    pub images: Vec<String>,
    /// Base name of the source folder; full-size links are `<folder_name>/<file>`.
    pub folder_name: String,
    /// Archive file name, when one was produced.
    pub archive_name: Option<String>,
}

const CSS: &str = include_str!("../static/gallery.css");
const JS: &str = include_str!("../static/lightbox.js");

/// Relative URL of an image's thumbnail.
pub fn thumbnail_src(filename: &str) -> String {
    format!("{}/{}", crate::types::THUMBNAIL_DIR, filename)
}

/// Relative URL of an image's full-size original.
pub fn full_src(folder_name: &str, filename: &str) -> String {
    format!("{folder_name}/{filename}")
}

/// Render the gallery page.
pub fn render_gallery(ctx: &RenderContext) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (ctx.title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                h1 { (ctx.title) }
                @if let Some(archive) = &ctx.archive_name {
                    (download_link(archive))
                }
                section.gallery {
                    @for image in &ctx.images {
                        (gallery_item(&ctx.folder_name, image))
                    }
                }
                (lightbox())
                script { (PreEscaped(JS)) }
            }
        }
    }
}

fn download_link(archive: &str) -> Markup {
    html! {
        div.download-link {
            a href=(archive) download { "Download all photos as ZIP" }
        }
    }
}

fn gallery_item(folder_name: &str, filename: &str) -> Markup {
    html! {
        div.gallery-item {
            img.zoomable
                src=(thumbnail_src(filename))
                data-full=(full_src(folder_name, filename))
                alt=(filename)
                loading="lazy";
        }
    }
}

/// Empty lightbox overlay, filled in by the script on click.
fn lightbox() -> Markup {
    html! {
        div id="lightbox" class="lightbox" {
            span.lightbox-close { (PreEscaped("&times;")) }
            a.lightbox-nav.lightbox-prev { (PreEscaped("&#10094;")) }
            a.lightbox-nav.lightbox-next { (PreEscaped("&#10095;")) }
            img id="lightbox-img" src="" alt="Lightbox Image";
        }
    }
}

/// Render `ctx` and write it to `path`, replacing any existing file.
pub fn write_gallery(ctx: &RenderContext, path: &Path) -> Result<(), GenerateError> {
    let page = render_gallery(ctx).into_string();
    fs::write(path, page).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
