//! Lightbox behavior in a real browser: open, wraparound, close.
//!
//! Builds a three-image gallery with the `snapgal` binary, then drives the
//! page over `file://` in headless Chrome.
//!
//! Run with: `cargo test --test browser_lightbox -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use image::{Rgb, RgbImage};
use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, OnceLock};
use tempfile::TempDir;

// ===========================================================================
// Setup helpers
// ===========================================================================

/// Gallery built once per test binary: `photos/{1,2,3}.jpg` → `gallery.html`.
fn gallery_html() -> &'static PathBuf {
    static DIR: OnceLock<TempDir> = OnceLock::new();
    static HTML: OnceLock<PathBuf> = OnceLock::new();
    HTML.get_or_init(|| {
        let tmp = DIR.get_or_init(|| TempDir::new().unwrap());
        let folder = tmp.path().join("photos");
        std::fs::create_dir(&folder).unwrap();
        for (i, shade) in [40u8, 120, 200].into_iter().enumerate() {
            RgbImage::from_pixel(60, 40, Rgb([shade, shade, shade]))
                .save_with_format(folder.join(format!("{}.jpg", i + 1)), image::ImageFormat::Jpeg)
                .unwrap();
        }

        let status = Command::new(env!("CARGO_BIN_EXE_snapgal"))
            .arg("photos")
            .current_dir(tmp.path())
            .status()
            .expect("failed to run snapgal");
        assert!(status.success(), "gallery generation failed");
        tmp.path().join("gallery.html")
    })
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn open_gallery() -> Arc<Tab> {
    let tab = browser().new_tab().unwrap();
    tab.navigate_to(&format!("file://{}", gallery_html().display()))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    tab
}

fn eval_bool(tab: &Tab, js: &str) -> bool {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .unwrap()
        .as_bool()
        .unwrap()
}

fn eval_string(tab: &Tab, js: &str) -> String {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .unwrap()
        .as_str()
        .unwrap()
        .to_string()
}

fn is_open(tab: &Tab) -> bool {
    eval_bool(tab, "document.getElementById('lightbox').classList.contains('active')")
}

/// File name of the image currently shown in the lightbox.
fn shown(tab: &Tab) -> String {
    eval_string(
        tab,
        "document.getElementById('lightbox-img').src.split('/').pop()",
    )
}

fn click_thumbnail(tab: &Tab, index: usize) {
    tab.evaluate(
        &format!("document.querySelectorAll('.zoomable')[{index}].click()"),
        false,
    )
    .unwrap();
}

fn press(tab: &Tab, key: &str) {
    tab.evaluate(
        &format!("document.dispatchEvent(new KeyboardEvent('keydown', {{ key: '{key}' }}))"),
        false,
    )
    .unwrap();
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
#[ignore]
fn lightbox_starts_closed() {
    let tab = open_gallery();
    assert!(!is_open(&tab));
    assert_eq!(
        eval_string(&tab, "String(document.querySelectorAll('.zoomable').length)"),
        "3"
    );
}

#[test]
#[ignore]
fn click_opens_full_size_image() {
    let tab = open_gallery();
    click_thumbnail(&tab, 1);

    assert!(is_open(&tab));
    assert_eq!(shown(&tab), "2.jpg");
    assert!(eval_bool(
        &tab,
        "document.getElementById('lightbox-img').src.includes('/photos/2.jpg')"
    ));
}

#[test]
#[ignore]
fn arrows_wrap_around_both_ends() {
    let tab = open_gallery();
    click_thumbnail(&tab, 2);

    press(&tab, "ArrowRight");
    assert_eq!(shown(&tab), "1.jpg", "next from last wraps to first");

    press(&tab, "ArrowLeft");
    assert_eq!(shown(&tab), "3.jpg", "previous from first wraps to last");
}

#[test]
#[ignore]
fn nav_buttons_step_without_closing() {
    let tab = open_gallery();
    click_thumbnail(&tab, 0);

    tab.evaluate("document.querySelector('.lightbox-next').click()", false)
        .unwrap();
    assert_eq!(shown(&tab), "2.jpg");
    assert!(is_open(&tab));

    tab.evaluate("document.querySelector('.lightbox-prev').click()", false)
        .unwrap();
    assert_eq!(shown(&tab), "1.jpg");
    assert!(is_open(&tab));
}

#[test]
#[ignore]
fn escape_and_backdrop_close() {
    let tab = open_gallery();

    click_thumbnail(&tab, 0);
    press(&tab, "Escape");
    assert!(!is_open(&tab));

    click_thumbnail(&tab, 0);
    tab.evaluate("document.getElementById('lightbox').click()", false)
        .unwrap();
    assert!(!is_open(&tab));

    click_thumbnail(&tab, 0);
    tab.evaluate("document.querySelector('.lightbox-close').click()", false)
        .unwrap();
    assert!(!is_open(&tab));
}

#[test]
#[ignore]
fn clicking_the_open_image_keeps_lightbox_open() {
    let tab = open_gallery();
    click_thumbnail(&tab, 0);
    tab.evaluate("document.getElementById('lightbox-img').click()", false)
        .unwrap();
    assert!(is_open(&tab));
}
