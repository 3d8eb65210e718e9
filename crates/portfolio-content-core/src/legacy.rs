//! Legacy aggregate format.
//!
//! Before content moved to one file per record, every poem lived in a
//! single flat file of bracket-delimited blocks:
//!
//! ```text
//! [Digital Dreams]
//! In circuits deep and silicon vast...
//!
//! [Morning Light]
//! The sun climbs slow...
//! ```
//!
//! Each block starts at `[`, its title runs to the next `]`, and its body
//! runs to the next `[`. A block with no closing `]` (or an empty title)
//! is malformed and skipped. Text before the first `[` is not a record.

use crate::models::{ContentKind, ContentRecord, RecordOrigin};
use crate::normalize::{titled_record, NormalizeOptions};

/// One `[Title] body` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyBlock {
    pub title: String,
    pub body: String,
}

/// Result of splitting a legacy file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyParse {
    pub blocks: Vec<LegacyBlock>,
    /// 1-based positions (in bracket order) of skipped malformed blocks.
    pub malformed: Vec<usize>,
    /// Whether non-blank text preceded the first `[` and was ignored.
    pub leading_text: bool,
}

/// Split legacy aggregate text into blocks.
pub fn parse_legacy(text: &str) -> LegacyParse {
    let mut parse = LegacyParse::default();
    let mut pieces = text.split('[');

    if let Some(prefix) = pieces.next() {
        parse.leading_text = !prefix.trim().is_empty();
    }

    for (i, piece) in pieces.enumerate() {
        let position = i + 1;
        let Some((title, body)) = piece.split_once(']') else {
            parse.malformed.push(position);
            continue;
        };
        let title = title.trim();
        if title.is_empty() {
            parse.malformed.push(position);
            continue;
        }
        parse.blocks.push(LegacyBlock {
            title: title.to_string(),
            body: body.trim().to_string(),
        });
    }
    parse
}

/// Turn legacy blocks into records. Every record is stamped with `date`,
/// since the format carries no dates of its own.
pub fn legacy_records(
    blocks: &[LegacyBlock],
    kind: ContentKind,
    date: &str,
    source_file: Option<&str>,
    opts: &NormalizeOptions,
) -> Vec<ContentRecord> {
    blocks
        .iter()
        .map(|block| {
            let mut record = titled_record(
                kind,
                &block.title,
                &block.body,
                date.to_string(),
                RecordOrigin::Legacy,
                opts,
            );
            record.source_file = source_file.map(str::to_string);
            record
        })
        .collect()
}
