//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate thumbnail dimensions for a fixed target width.
///
/// The width is capped at the source width (thumbnails never upscale), and the
/// height keeps the source aspect ratio, rounded to the nearest pixel and never
/// below 1.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `target_width` - Desired thumbnail width in pixels
///
/// # Examples
/// ```
/// # use snapgal::imaging::calculate_width_resize;
/// // 4000x3000 landscape at width 400 → 400x300
/// assert_eq!(calculate_width_resize((4000, 3000), 400), (400, 300));
///
/// // Narrower than the target: unchanged
/// assert_eq!(calculate_width_resize((300, 500), 400), (300, 500));
/// ```
pub fn calculate_width_resize(source: (u32, u32), target_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return (target_width.max(1), 1);
    }

    let w = target_width.clamp(1, src_w);
    let h = (src_h as f64 * w as f64 / src_w as f64).round() as u32;
    (w, h.max(1))
}
