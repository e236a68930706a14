/// Leading-edge throttle: the first call runs, then calls are dropped until the
/// window closes. Time is passed in so the gate works with any clock.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: f64,
    open_until: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms),
            open_until: None,
        }
    }

    /// Returns `true` when the wrapped handler should run at `now_ms`.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.open_until {
            Some(until) if now_ms < until => false,
            _ => {
                self.open_until = Some(now_ms + self.interval_ms);
                true
            }
        }
    }

    pub fn is_pending(&self, now_ms: f64) -> bool {
        self.open_until.is_some_and(|until| now_ms < until)
    }
}
