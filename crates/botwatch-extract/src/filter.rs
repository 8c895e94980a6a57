//! Candidate filtering and display helpers

use std::borrow::Cow;

/// Texts at or below this many characters are not classified
pub const DEFAULT_MIN_LENGTH: usize = 10;

/// Characters shown when echoing a tweet back to the user
pub const PREVIEW_CHARS: usize = 200;

/// Drops texts too short to carry a useful n-gram signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthFilter {
    min_length: usize,
}

impl Default for LengthFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH)
    }
}

impl LengthFilter {
    /// Keep texts strictly longer than `min_length` characters
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Whether a text passes; length is counted in characters, not bytes
    pub fn accepts(&self, text: &str) -> bool {
        text.chars().count() > self.min_length
    }

    /// Keep passing texts, preserving order
    pub fn apply(&self, texts: Vec<String>) -> Vec<String> {
        texts.into_iter().filter(|t| self.accepts(t)).collect()
    }
}

/// First `max_chars` characters of `text`, with `...` appended when cut
pub fn preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((end, _)) => Cow::Owned(format!("{}...", &text[..end])),
    }
}
