/// Size and placement of a click ripple inside a button, relative to its box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

impl Ripple {
    /// Centers a square ripple, as large as the button's longest side, on the click.
    pub fn at_click(left: f64, top: f64, width: f64, height: f64, client_x: f64, client_y: f64) -> Self {
        let size = width.max(height);
        Self {
            size,
            x: client_x - left - size / 2.0,
            y: client_y - top - size / 2.0,
        }
    }
}
