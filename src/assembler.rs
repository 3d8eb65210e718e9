//! Content set assembly.
//!
//! Coordinates the load flow for one content kind: scan → parse →
//! normalize → de-duplicate → sort. Sources are tried in order and the
//! first one that yields records wins:
//!
//! 1. the kind's content directory (one record per file),
//! 2. the legacy aggregate file (one record per `[Title]` block),
//! 3. static fallback records from configuration.
//!
//! Nothing is cached: every [`ContentService::load`] re-reads the
//! filesystem. Bad files, blocks, and sources are recorded as
//! [`ContentIssue`]s and skipped; a load never fails.

use anyhow::Result;
use chrono::Utc;
use globset::GlobMatcher;
use portfolio_content_core::legacy::{legacy_records, parse_legacy};
use portfolio_content_core::models::{ContentKind, ContentRecord, RecordOrigin};
use portfolio_content_core::normalize::{format_date, normalize, titled_record, NormalizeOptions};
use portfolio_content_core::parse::{decode_bytes, needs_fallback_decoding, parse_block};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::config::{Config, FallbackRecord, KindSource};
use crate::issue::ContentIssue;
use crate::scanner::{scan_dir, ContentFile};

/// Which source a [`ContentSet`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SetOrigin {
    Directory,
    Legacy,
    Fallback,
    /// No source produced any record.
    Empty,
}

impl SetOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetOrigin::Directory => "directory",
            SetOrigin::Legacy => "legacy",
            SetOrigin::Fallback => "fallback",
            SetOrigin::Empty => "empty",
        }
    }
}

/// Ordered, immutable records of one kind with lookup by slug.
///
/// Records are sorted by `date` descending (most recent first); ties go
/// to the more recently modified file, then keep source order.
#[derive(Debug, Clone)]
pub struct ContentSet {
    kind: ContentKind,
    origin: SetOrigin,
    records: Vec<ContentRecord>,
    index: HashMap<String, usize>,
    issues: Vec<ContentIssue>,
}

impl ContentSet {
    fn new(
        kind: ContentKind,
        origin: SetOrigin,
        mut records: Vec<ContentRecord>,
        issues: Vec<ContentIssue>,
    ) -> Self {
        records.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.modified_at.cmp(&a.modified_at))
        });
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.slug.clone(), i))
            .collect();
        Self {
            kind,
            origin,
            records,
            index,
            issues,
        }
    }

    /// Exact-match lookup. `None` means the slug is not in this set.
    pub fn get(&self, slug: &str) -> Option<&ContentRecord> {
        self.index.get(slug).map(|&i| &self.records[i])
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn origin(&self) -> SetOrigin {
        self.origin
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Recoverable conditions met while loading.
    pub fn issues(&self) -> &[ContentIssue] {
        &self.issues
    }

    pub fn into_records(self) -> Vec<ContentRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ContentSet {
    type Item = &'a ContentRecord;
    type IntoIter = std::slice::Iter<'a, ContentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Poems and blogs loaded together.
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    pub poems: ContentSet,
    pub blogs: ContentSet,
}

impl ContentLibrary {
    pub fn get(&self, kind: ContentKind) -> &ContentSet {
        match kind {
            ContentKind::Poem => &self.poems,
            ContentKind::Blog => &self.blogs,
        }
    }

    pub fn sets(&self) -> [&ContentSet; 2] {
        [&self.poems, &self.blogs]
    }
}

/// Loads content sets from a configured content root.
///
/// Holds only configuration; construct one per call site or share it,
/// it has no mutable state.
#[derive(Debug, Clone)]
pub struct ContentService {
    config: Config,
    matcher: GlobMatcher,
    opts: NormalizeOptions,
}

impl ContentService {
    pub fn new(config: Config) -> Result<Self> {
        let matcher = config.include_matcher()?;
        let opts = config.normalize_options();
        Ok(Self {
            config,
            matcher,
            opts,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load every record of `kind`.
    pub fn load(&self, kind: ContentKind) -> ContentSet {
        let source = self.config.source(kind);
        let mut issues = Vec::new();

        let mut origin = SetOrigin::Directory;
        let mut records = self.load_directory(&source, &mut issues);

        if records.is_empty() {
            if let Some(legacy_path) = &source.legacy_file {
                records = self.load_legacy(kind, legacy_path, &mut issues);
                origin = SetOrigin::Legacy;
            }
        }
        if records.is_empty() && !source.fallback.is_empty() {
            records = self.fallback_records(kind, &source.fallback);
            origin = SetOrigin::Fallback;
        }
        if records.is_empty() {
            origin = SetOrigin::Empty;
        }

        let records = dedup_by_slug(records, &mut issues);
        tracing::info!(
            kind = %kind,
            origin = origin.as_str(),
            records = records.len(),
            issues = issues.len(),
            "content loaded"
        );
        ContentSet::new(kind, origin, records, issues)
    }

    pub fn load_all(&self) -> ContentLibrary {
        ContentLibrary {
            poems: self.load(ContentKind::Poem),
            blogs: self.load(ContentKind::Blog),
        }
    }

    fn load_directory(&self, source: &KindSource, issues: &mut Vec<ContentIssue>) -> Vec<ContentRecord> {
        let files = scan_dir(&source.dir, &self.matcher);
        if let Some(dir) = files.missing_dir() {
            issues.push(ContentIssue::DirectoryMissing {
                path: dir.to_path_buf(),
            });
        }

        let mut loaded: Vec<ContentFile> = Vec::new();
        for item in files {
            match item {
                Ok(file) => loaded.push(file),
                Err(issue) => {
                    tracing::warn!(%issue, "skipping content file");
                    issues.push(issue);
                }
            }
        }

        // File-name order makes slug collisions resolve deterministically.
        loaded.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        loaded
            .into_iter()
            .map(|file| {
                if needs_fallback_decoding(&file.bytes) {
                    let issue = ContentIssue::Latin1Fallback {
                        path: file.path.clone(),
                    };
                    tracing::info!(%issue);
                    issues.push(issue);
                }
                let block = parse_block(&decode_bytes(&file.bytes));
                tracing::debug!(file = %file.file_name, keys = block.metadata.len(), "parsed");
                normalize(block, source.kind, &file.file_name, file.stamps, &self.opts)
            })
            .collect()
    }

    fn load_legacy(
        &self,
        kind: ContentKind,
        path: &Path,
        issues: &mut Vec<ContentIssue>,
    ) -> Vec<ContentRecord> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let issue = ContentIssue::LegacyUnavailable {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                };
                tracing::warn!(%issue);
                issues.push(issue);
                return Vec::new();
            }
        };

        let parse = parse_legacy(&decode_bytes(&bytes));
        for position in parse.malformed {
            let issue = ContentIssue::MalformedLegacyBlock {
                path: path.to_path_buf(),
                position,
            };
            tracing::warn!(%issue);
            issues.push(issue);
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        let today = format_date(Utc::now());
        legacy_records(&parse.blocks, kind, &today, file_name.as_deref(), &self.opts)
    }

    fn fallback_records(&self, kind: ContentKind, fallback: &[FallbackRecord]) -> Vec<ContentRecord> {
        let today = format_date(Utc::now());
        fallback
            .iter()
            .map(|f| {
                let mut record = titled_record(
                    kind,
                    &f.title,
                    &f.body,
                    f.date.clone().unwrap_or_else(|| today.clone()),
                    RecordOrigin::Fallback,
                    &self.opts,
                );
                if let Some(slug) = f.slug.as_ref().filter(|s| !s.trim().is_empty()) {
                    record.slug = slug.trim().to_string();
                }
                record.tags = f.tags.clone();
                record
            })
            .collect()
    }
}

/// Keep one record per slug; a later record replaces an earlier one in
/// place.
fn dedup_by_slug(records: Vec<ContentRecord>, issues: &mut Vec<ContentIssue>) -> Vec<ContentRecord> {
    let mut out: Vec<ContentRecord> = Vec::with_capacity(records.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        match positions.get(&record.slug) {
            Some(&i) => {
                let issue = ContentIssue::SlugCollision {
                    slug: record.slug.clone(),
                    replaced: describe(&out[i]),
                    replaced_by: describe(&record),
                };
                tracing::warn!(%issue);
                issues.push(issue);
                out[i] = record;
            }
            None => {
                positions.insert(record.slug.clone(), out.len());
                out.push(record);
            }
        }
    }
    out
}

fn describe(record: &ContentRecord) -> String {
    match (&record.source_file, record.origin) {
        (Some(file), RecordOrigin::Directory) => file.clone(),
        (Some(file), _) => format!("{} block '{}'", file, record.title),
        (None, _) => format!("fallback '{}'", record.title),
    }
}
