//! Metadata-block parser.
//!
//! Content files carry an optional header of `Key: value` lines, ended by
//! a standalone `---` line, followed by a free-form body:
//!
//! ```text
//! Title: Morning Light
//! Date: 2025-01-01
//! Tags: dawn, light
//! ---
//! The body starts here.
//! ```
//!
//! The parser is tolerant: a file without a separator is all body, header
//! lines without a colon are ignored, and any byte sequence decodes to
//! some string (UTF-8 first, Latin-1 otherwise).

use std::collections::HashMap;

use crate::models::ParsedBlock;

/// The line that ends the metadata section.
pub const SEPARATOR: &str = "---";

const UTF8_BOM: char = '\u{feff}';

/// Decode raw file bytes to text.
///
/// Tries UTF-8 first and falls back to Latin-1, where every byte maps to
/// the code point of the same value. Never fails. A leading UTF-8 byte
/// order mark is dropped.
pub fn decode_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Returns `true` if `bytes` are not valid UTF-8 and would be decoded
/// through the Latin-1 fallback.
pub fn needs_fallback_decoding(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_err()
}

/// Parse decoded file text into metadata and body.
///
/// Everything before the first standalone `---` line is the metadata
/// section; everything after it, trimmed, is the body. Without a separator
/// the metadata is empty and the body is the whole trimmed text.
pub fn parse_block(text: &str) -> ParsedBlock {
    match split_at_separator(text) {
        Some((header, body)) => ParsedBlock {
            metadata: parse_metadata(header),
            body: body.trim().to_string(),
        },
        None => ParsedBlock {
            metadata: HashMap::new(),
            body: text.trim().to_string(),
        },
    }
}

/// Split `text` around the first line whose trimmed content is exactly
/// [`SEPARATOR`]. The separator line itself belongs to neither half.
fn split_at_separator(text: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim() == SEPARATOR {
            return Some((&text[..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse `Key: value` lines. Keys are trimmed and lower-cased, values
/// trimmed; the split happens at the first colon so values may contain
/// colons. Later duplicates overwrite earlier ones.
fn parse_metadata(header: &str) -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    for line in header.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        metadata.insert(key, value.trim().to_string());
    }
    metadata
}
