/// Speed multiplier for the parallax layer at `index`.
pub fn layer_speed(base: f64, step: f64, index: usize) -> f64 {
    base + index as f64 * step
}

/// Vertical offset in px for a layer moving at `speed` when the page is
/// scrolled by `scroll_y`.
pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    -(scroll_y * speed)
}

/// How far through the document the viewport is, in percent.
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn px(value: f64) -> String {
    format!("{value}px")
}

pub fn percent(value: f64) -> String {
    format!("{value}%")
}
