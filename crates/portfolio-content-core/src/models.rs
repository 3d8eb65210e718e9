//! Core data models for the content pipeline.
//!
//! These types represent the parsed blocks and normalized records that
//! flow from the scanner, through the parser and normalizer, into the
//! content sets handed to the rendering layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The category of a content record. Each kind has its own directory
/// and field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Poem,
    Blog,
}

impl ContentKind {
    pub const ALL: [ContentKind; 2] = [ContentKind::Poem, ContentKind::Blog];

    /// Singular identifier (`"poem"`, `"blog"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Poem => "poem",
            ContentKind::Blog => "blog",
        }
    }

    /// Default directory name under the content root (`"poems"`, `"blogs"`).
    pub fn dir_name(&self) -> &'static str {
        match self {
            ContentKind::Poem => "poems",
            ContentKind::Blog => "blogs",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poem" | "poems" => Ok(ContentKind::Poem),
            "blog" | "blogs" => Ok(ContentKind::Blog),
            other => Err(format!(
                "unknown content kind: '{}'. Must be poems or blogs.",
                other
            )),
        }
    }
}

/// Output of the metadata-block parser for a single file.
///
/// Keys are lower-cased and trimmed; values are trimmed. When the source
/// had no `---` separator line, `metadata` is empty and `body` is the whole
/// trimmed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBlock {
    pub metadata: HashMap<String, String>,
    pub body: String,
}

impl ParsedBlock {
    /// Metadata value for `key`, treating blank values as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Filesystem timestamps of a content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamps {
    pub modified: DateTime<Utc>,
    /// Not every filesystem reports a creation time.
    pub created: Option<DateTime<Utc>>,
}

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordOrigin {
    /// One file in the kind's content directory.
    Directory,
    /// A bracketed block in the legacy aggregate file.
    Legacy,
    /// A static record from configuration.
    Fallback,
}

/// A fully normalized content record, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    /// Lookup key, unique within its kind.
    pub slug: String,
    pub title: String,
    pub body: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub tags: Vec<String>,
    pub kind: ContentKind,
    /// Blogs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Blogs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Blogs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub origin: RecordOrigin,
    /// File name the record was read from (the legacy file's name for
    /// legacy records, `None` for configured fallbacks).
    pub source_file: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}
