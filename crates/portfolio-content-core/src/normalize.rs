//! Record normalization.
//!
//! Turns a [`ParsedBlock`] plus its file provenance into a fully typed
//! [`ContentRecord`], filling every field the file left out:
//!
//! | Field | From metadata | Otherwise |
//! |-------|---------------|-----------|
//! | `slug` | — | file stem, verbatim |
//! | `title` | `title` | file stem, separators to spaces, title case |
//! | `date` | `date` | modification time as `YYYY-MM-DD` (local) |
//! | `tags` | `tags`, comma split | empty |
//! | `summary` (blogs) | `summary` | first paragraph, truncated at a word |
//! | `author`, `category` (blogs) | same key | configured default |

use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Local, Utc};
use regex::Regex;

use crate::models::{ContentKind, ContentRecord, FileStamps, ParsedBlock, RecordOrigin};

/// Default summary budget, in characters.
pub const DEFAULT_SUMMARY_CHARS: usize = 150;
/// Default truncation marker.
pub const DEFAULT_ELLIPSIS: &str = "...";

const UNTITLED: &str = "untitled";

static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]{0,3}#{1,6}[ \t]+").unwrap());
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\*\*|__)(.+?)(\*\*|__)").unwrap());
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());

/// Knobs for normalization, usually taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub summary_chars: usize,
    pub ellipsis: String,
    pub default_author: String,
    pub default_category: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            summary_chars: DEFAULT_SUMMARY_CHARS,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            default_author: "Portfolio Author".to_string(),
            default_category: "Technology".to_string(),
        }
    }
}

/// Normalize one parsed file into a record.
///
/// `file_name` is the bare file name (`"morning-light.txt"`); its stem
/// becomes the slug unchanged so records stay addressable by file name.
pub fn normalize(
    block: ParsedBlock,
    kind: ContentKind,
    file_name: &str,
    stamps: FileStamps,
    opts: &NormalizeOptions,
) -> ContentRecord {
    let slug = file_stem(file_name);
    let title = block
        .get("title")
        .map(str::to_string)
        .unwrap_or_else(|| title_from_stem(&slug));
    let date = block
        .get("date")
        .map(str::to_string)
        .unwrap_or_else(|| format_date(stamps.modified));
    let tags = block.get("tags").map(parse_tags).unwrap_or_default();

    let mut record = ContentRecord {
        slug,
        title,
        body: String::new(),
        date,
        tags,
        kind,
        summary: None,
        author: None,
        category: None,
        origin: RecordOrigin::Directory,
        source_file: Some(file_name.to_string()),
        modified_at: Some(stamps.modified),
        created_at: stamps.created,
    };
    if kind == ContentKind::Blog {
        record.summary = Some(
            block
                .get("summary")
                .map(str::to_string)
                .unwrap_or_else(|| generate_summary(&block.body, opts.summary_chars, &opts.ellipsis)),
        );
        record.author = Some(
            block
                .get("author")
                .unwrap_or(opts.default_author.as_str())
                .to_string(),
        );
        record.category = Some(
            block
                .get("category")
                .unwrap_or(opts.default_category.as_str())
                .to_string(),
        );
    }
    record.body = block.body;
    record
}

/// Build a record from a bare title and body, as used for legacy blocks
/// and configured fallbacks. The slug is derived from the title; tags are
/// empty and there is no file provenance.
pub fn titled_record(
    kind: ContentKind,
    title: &str,
    body: &str,
    date: String,
    origin: RecordOrigin,
    opts: &NormalizeOptions,
) -> ContentRecord {
    let title = match title.trim() {
        "" => title_from_stem(UNTITLED),
        t => t.to_string(),
    };
    let body = body.trim().to_string();
    let is_blog = kind == ContentKind::Blog;
    ContentRecord {
        slug: slugify(&title),
        summary: is_blog.then(|| generate_summary(&body, opts.summary_chars, &opts.ellipsis)),
        author: is_blog.then(|| opts.default_author.clone()),
        category: is_blog.then(|| opts.default_category.clone()),
        title,
        body,
        date,
        tags: Vec::new(),
        kind,
        origin,
        source_file: None,
        modified_at: None,
        created_at: None,
    }
}

/// File name without its final extension.
pub fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string())
}

/// `"my_first-poem"` → `"My First Poem"`. Never returns an empty string.
pub fn title_from_stem(stem: &str) -> String {
    let spaced = stem.replace(['_', '-'], " ");
    let title = spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    if title.is_empty() {
        capitalize(UNTITLED)
    } else {
        title
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// URL-safe slug: lower-cased, with runs of whitespace and punctuation
/// collapsed to a single hyphen and no leading/trailing hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        UNTITLED.to_string()
    } else {
        slug
    }
}

/// Split a comma-delimited tag list, trimming pieces and dropping empties.
pub fn parse_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Format a timestamp as a local `YYYY-MM-DD` date.
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Auto-generate a summary from a body.
///
/// Heading markers and `*`/`_` emphasis are stripped, then the first
/// blank-line-delimited paragraph is taken with its whitespace collapsed.
/// If it is longer than `max_chars`, it is cut at the last whole word that
/// leaves room for `ellipsis`, and `ellipsis` is appended. The result never
/// exceeds `max_chars` characters.
pub fn generate_summary(body: &str, max_chars: usize, ellipsis: &str) -> String {
    let cleaned = HEADING_MARKER.replace_all(body, "");
    let cleaned = STRONG.replace_all(&cleaned, "$2");
    let cleaned = EMPHASIS.replace_all(&cleaned, "$1");

    let first = PARAGRAPH_BREAK
        .split(cleaned.trim())
        .next()
        .unwrap_or_default();
    let paragraph = first.split_whitespace().collect::<Vec<_>>().join(" ");

    if paragraph.chars().count() <= max_chars {
        return paragraph;
    }

    let room = max_chars.saturating_sub(ellipsis.chars().count());
    let mut summary = String::new();
    let mut len = 0;
    for word in paragraph.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if summary.is_empty() {
            word_len
        } else {
            len + 1 + word_len
        };
        if needed > room {
            break;
        }
        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(word);
        len = needed;
    }
    if summary.is_empty() {
        // A single word longer than the budget: hard cut.
        summary = paragraph.chars().take(room).collect();
    }
    summary.push_str(ellipsis);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_block;
    use chrono::TimeZone;

    fn stamps() -> FileStamps {
        FileStamps {
            modified: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
            created: None,
        }
    }

    #[test]
    fn test_well_formed_poem() {
        let block = parse_block("Title: X\nDate: 2025-01-01\nTags: a, b\n---\nBody text");
        let rec = normalize(
            block,
            ContentKind::Poem,
            "x-file.txt",
            stamps(),
            &NormalizeOptions::default(),
        );
        assert_eq!(rec.title, "X");
        assert_eq!(rec.date, "2025-01-01");
        assert_eq!(rec.tags, vec!["a", "b"]);
        assert_eq!(rec.body, "Body text");
        assert_eq!(rec.slug, "x-file");
        assert_eq!(rec.source_file.as_deref(), Some("x-file.txt"));
        assert_eq!(rec.origin, RecordOrigin::Directory);
        assert!(rec.summary.is_none());
        assert!(rec.author.is_none());
    }

    #[test]
    fn test_missing_fields_derived_from_file() {
        let rec = normalize(
            parse_block(""),
            ContentKind::Poem,
            "my_first-poem.txt",
            stamps(),
            &NormalizeOptions::default(),
        );
        assert_eq!(rec.title, "My First Poem");
        assert_eq!(rec.slug, "my_first-poem");
        assert_eq!(rec.date, format_date(stamps().modified));
        assert!(rec.tags.is_empty());
        assert_eq!(rec.body, "");
    }

    #[test]
    fn test_blog_defaults_and_summary() {
        let opts = NormalizeOptions {
            default_author: "Ada".to_string(),
            ..NormalizeOptions::default()
        };
        let block = parse_block("Category: Data\n---\n# Heading\n\nFirst **bold** line.\n\nSecond.");
        let rec = normalize(block, ContentKind::Blog, "post.txt", stamps(), &opts);
        assert_eq!(rec.author.as_deref(), Some("Ada"));
        assert_eq!(rec.category.as_deref(), Some("Data"));
        assert_eq!(rec.summary.as_deref(), Some("Heading"));
    }

    #[test]
    fn test_blog_summary_from_metadata() {
        let block = parse_block("Summary: Hand written.\n---\nLong body.");
        let rec = normalize(
            block,
            ContentKind::Blog,
            "post.txt",
            stamps(),
            &NormalizeOptions::default(),
        );
        assert_eq!(rec.summary.as_deref(), Some("Hand written."));
        assert_eq!(rec.category.as_deref(), Some("Technology"));
    }

    #[test]
    fn test_tags_trimmed_and_empties_dropped() {
        assert_eq!(parse_tags(" a, ,b ,, c "), vec!["a", "b", "c"]);
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem("hello_WORLD"), "Hello World");
        assert_eq!(title_from_stem("--"), "Untitled");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("The Road, Not Taken."), "the-road-not-taken");
        assert_eq!(slugify("  Don't   Stop!  "), "don-t-stop");
        assert_eq!(slugify("???"), "untitled");
    }

    #[test]
    fn test_summary_short_paragraph_untouched() {
        let summary = generate_summary("Short *first* one.\n\nSecond paragraph.", 150, "...");
        assert_eq!(summary, "Short first one.");
    }

    #[test]
    fn test_summary_truncated_at_word_boundary() {
        let body = "word ".repeat(60);
        let summary = generate_summary(&body, 150, "...");
        assert!(summary.ends_with("..."));
        assert!(summary.chars().count() <= 150);
        let stem = summary.trim_end_matches("...");
        assert!(stem.split(' ').all(|w| w == "word"));
    }

    #[test]
    fn test_summary_long_single_word_hard_cut() {
        let body = "x".repeat(200);
        let summary = generate_summary(&body, 20, "...");
        assert_eq!(summary, format!("{}...", "x".repeat(17)));
    }

    #[test]
    fn test_summary_empty_body() {
        assert_eq!(generate_summary("", 150, "..."), "");
    }

    #[test]
    fn test_titled_record_blog() {
        let rec = titled_record(
            ContentKind::Blog,
            " Old Post ",
            "  Some text.  ",
            "2020-01-01".to_string(),
            RecordOrigin::Legacy,
            &NormalizeOptions::default(),
        );
        assert_eq!(rec.slug, "old-post");
        assert_eq!(rec.title, "Old Post");
        assert_eq!(rec.body, "Some text.");
        assert_eq!(rec.summary.as_deref(), Some("Some text."));
        assert!(rec.tags.is_empty());
    }
}
