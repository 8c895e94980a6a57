//! Raw document parsing
//!
//! Syntax errors are reported as [`Error::MalformedJson`]. Nesting is capped
//! at [`MAX_DOCUMENT_DEPTH`] levels and checked by an iterative pre-scan, so
//! the recursive parser never runs on a document deeper than the cap.
//! Deeper documents are reported as [`Error::DocumentTooDeep`].

use botwatch_core::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Deepest array/object nesting accepted in an uploaded document
pub const MAX_DOCUMENT_DEPTH: usize = 1000;

/// Parse a JSON document from text
pub fn parse_document(input: &str) -> Result<Value> {
    parse_document_bytes(input.as_bytes())
}

/// Parse a JSON document from raw bytes (for example an upload body)
pub fn parse_document_bytes(input: &[u8]) -> Result<Value> {
    if exceeds_depth(input, MAX_DOCUMENT_DEPTH) {
        return Err(Error::DocumentTooDeep {
            limit: MAX_DOCUMENT_DEPTH,
        });
    }

    let mut de = serde_json::Deserializer::from_slice(input);
    de.disable_recursion_limit();
    let value = Value::deserialize(&mut de).map_err(Error::MalformedJson)?;
    de.end().map_err(Error::MalformedJson)?;
    Ok(value)
}

/// Read and parse a JSON document from disk
pub fn read_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read document");
    parse_document_bytes(&bytes)
}

/// Whether brackets outside string literals ever nest deeper than `limit`
fn exceeds_depth(input: &[u8], limit: usize) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &byte in input {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > limit {
                    return true;
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    false
}
