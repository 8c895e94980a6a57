//! BotWatch Extract
//!
//! Pulls candidate tweet text out of Twitter data exports without assuming
//! any particular document schema.
//!
//! - [`parse_document`] turns raw bytes into a JSON tree
//! - [`TweetExtractor`] walks the tree and collects `full_text` values
//! - [`LengthFilter`] drops candidates too short to classify

pub mod document;
pub mod extractor;
pub mod filter;

pub use document::{parse_document, parse_document_bytes, read_document, MAX_DOCUMENT_DEPTH};
pub use extractor::{TweetExtractor, DEFAULT_TEXT_KEY};
pub use filter::{preview, LengthFilter, DEFAULT_MIN_LENGTH, PREVIEW_CHARS};
