/// Counts from zero to a target in fixed increments, one increment per tick.
#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CountUp {
    pub fn new(target: u64, duration_ms: u32, tick_ms: u32) -> Self {
        let ticks = f64::from(duration_ms) / f64::from(tick_ms.max(1));
        let increment = if ticks > 0.0 {
            target as f64 / ticks
        } else {
            target as f64
        };
        Self {
            target,
            increment,
            current: 0.0,
            finished: false,
        }
    }

    /// Advances one tick and returns the value to display. Once the target is
    /// reached the counter is finished and further ticks return `None`.
    pub fn tick(&mut self) -> Option<u64> {
        if self.finished {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.current = self.target as f64;
            self.finished = true;
        }
        Some(self.current.floor() as u64)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Reads a `data-target` value the way `parseInt` does: leading digits win,
/// anything unparsable is `None`.
pub fn parse_target(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Formats with comma thousands separators, e.g. `1,500`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
