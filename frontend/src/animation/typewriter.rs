/// Reveals a text one character at a time.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
        }
    }

    /// Reveals one more character and returns the visible prefix, or `None`
    /// once the whole text is showing.
    pub fn advance(&mut self) -> Option<String> {
        if self.shown >= self.chars.len() {
            return None;
        }
        self.shown += 1;
        Some(self.chars[..self.shown].iter().collect())
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }
}
