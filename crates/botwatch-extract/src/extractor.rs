//! Schema-agnostic tweet text extraction
//!
//! Export formats differ (flat arrays, `{"tweet": {...}}` wrappers, API
//! responses with `data` and `includes`), so rather than knowing any schema
//! the extractor walks the whole tree and collects every string stored
//! under the text key.

use serde_json::Value;
use tracing::debug;

/// Key holding tweet text in Twitter exports
pub const DEFAULT_TEXT_KEY: &str = "full_text";

/// Collects tweet texts from an arbitrary JSON tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetExtractor {
    key: String,
}

impl Default for TweetExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TweetExtractor {
    /// Extractor for the `full_text` key
    pub fn new() -> Self {
        Self::with_key(DEFAULT_TEXT_KEY)
    }

    /// Extractor for a custom text key
    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The key being collected
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Collect trimmed, non-blank texts in document preorder.
    ///
    /// An object's own text comes before anything nested inside it, and
    /// siblings are visited in source order. Non-string values under the key
    /// are ignored. Traversal uses an explicit stack so nesting depth is
    /// bounded by memory, not the call stack.
    pub fn extract(&self, root: &Value) -> Vec<String> {
        let mut texts = Vec::new();
        let mut stack: Vec<&Value> = vec![root];
        let mut visited = 0usize;

        while let Some(node) = stack.pop() {
            visited += 1;
            match node {
                Value::Object(map) => {
                    if let Some(Value::String(text)) = map.get(&self.key) {
                        let text = text.trim();
                        if !text.is_empty() {
                            texts.push(text.to_string());
                        }
                    }
                    stack.extend(map.values().rev());
                }
                Value::Array(items) => stack.extend(items.iter().rev()),
                _ => {}
            }
        }

        debug!(key = %self.key, nodes = visited, found = texts.len(), "Extracted tweet texts");
        texts
    }
}
