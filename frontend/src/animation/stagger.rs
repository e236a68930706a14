//! Per-index animation delays and palette cycling for repeated decorations.

const ICON_GRADIENTS: [&str; 8] = [
    "var(--gradient-primary)",
    "var(--gradient-secondary)",
    "var(--gradient-tertiary)",
    "var(--gradient-accent)",
    "var(--gradient-orange)",
    "var(--gradient-yellow)",
    "var(--gradient-cyan)",
    "var(--gradient-magenta)",
];

pub fn seconds(value: f64) -> String {
    format!("{value}s")
}

pub fn orb_float_delay(index: usize) -> String {
    seconds(index as f64 * 2.0)
}

pub fn testimonial_delay(index: usize) -> String {
    seconds(index as f64 * 2.0 / 10.0)
}

pub fn icon_pulse_delay(index: usize) -> String {
    seconds(index as f64 * 0.5)
}

pub fn icon_gradient(index: usize) -> &'static str {
    ICON_GRADIENTS[index % ICON_GRADIENTS.len()]
}
