//! Offline content maintenance: empty files, duplicates, format checks.
//!
//! The checker reads the same directories as the assembler but never
//! feeds it. [`IntegrityChecker::remove_empty`] is the only operation in
//! the crate that writes to the filesystem; run it offline, not while
//! content is being served.

use anyhow::Result;
use globset::GlobMatcher;
use portfolio_content_core::models::ContentKind;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::issue::ContentIssue;
use crate::scanner::{scan_dir, ContentFile};

/// A non-empty file with its size and content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDigest {
    pub file_name: String,
    pub size: u64,
    /// Hex SHA-256 of the file bytes.
    pub hash: String,
}

/// Two byte-identical files. `file_a` is the first file (in file-name
/// order) seen with `hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicatePair {
    pub file_a: String,
    pub file_b: String,
    pub hash: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub directory: PathBuf,
    pub directory_missing: bool,
    pub total_files: usize,
    pub empty_files: Vec<String>,
    pub valid_files: Vec<FileDigest>,
    pub duplicate_pairs: Vec<DuplicatePair>,
    /// Files that could not be read; not counted in `total_files`.
    #[serde(skip)]
    pub issues: Vec<ContentIssue>,
}

/// Result of checking one file against the strict `Title:`/`Content:`
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatCheck {
    pub valid: bool,
    pub issues: Vec<String>,
}

/// Names of files removed (or, in a dry run, that would be removed).
#[derive(Debug, Clone, Default)]
pub struct Cleanup {
    pub dry_run: bool,
    pub removed: Vec<String>,
    pub failures: Vec<ContentIssue>,
}

pub struct IntegrityChecker {
    config: Config,
    matcher: GlobMatcher,
}

impl IntegrityChecker {
    pub fn new(config: Config) -> Result<Self> {
        let matcher = config.include_matcher()?;
        Ok(Self { config, matcher })
    }

    fn dir(&self, kind: ContentKind) -> PathBuf {
        self.config.source(kind).dir
    }

    /// Sorted by file name; unreadable files are returned separately.
    fn files(&self, dir: &Path) -> (Vec<ContentFile>, Vec<ContentIssue>, bool) {
        let scan = scan_dir(dir, &self.matcher);
        let missing = scan.missing_dir().is_some();
        let mut files = Vec::new();
        let mut issues = Vec::new();
        for item in scan {
            match item {
                Ok(file) => files.push(file),
                Err(issue) => {
                    tracing::warn!(%issue);
                    issues.push(issue);
                }
            }
        }
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        (files, issues, missing)
    }

    /// Classify every matching file as empty or hashed, and pair up
    /// byte-identical files.
    pub fn scan(&self, kind: ContentKind) -> IntegrityReport {
        let dir = self.dir(kind);
        let (files, issues, missing) = self.files(&dir);

        let mut report = IntegrityReport {
            directory: dir,
            directory_missing: missing,
            total_files: files.len(),
            issues,
            ..IntegrityReport::default()
        };
        let mut first_seen: HashMap<String, String> = HashMap::new();

        for file in files {
            if file.is_empty() {
                report.empty_files.push(file.file_name);
                continue;
            }
            let hash = hash_bytes(&file.bytes);
            match first_seen.get(&hash) {
                Some(first) => report.duplicate_pairs.push(DuplicatePair {
                    file_a: first.clone(),
                    file_b: file.file_name.clone(),
                    hash: hash.clone(),
                }),
                None => {
                    first_seen.insert(hash.clone(), file.file_name.clone());
                }
            }
            report.valid_files.push(FileDigest {
                size: file.len(),
                file_name: file.file_name,
                hash,
            });
        }

        tracing::debug!(
            kind = %kind,
            total = report.total_files,
            empty = report.empty_files.len(),
            duplicates = report.duplicate_pairs.len(),
            "integrity scan"
        );
        report
    }

    /// [`validate_format`] for every matching file of `kind`, in file-name
    /// order.
    pub fn validate_directory(&self, kind: ContentKind) -> Vec<(String, FormatCheck)> {
        let (files, issues, _) = self.files(&self.dir(kind));
        let mut checks: Vec<(String, FormatCheck)> = files
            .into_iter()
            .map(|f| {
                let check = check_text(&f.bytes);
                (f.file_name, check)
            })
            .collect();
        for issue in issues {
            if let ContentIssue::ReadFailure { path, message } = issue {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                checks.push((
                    name,
                    FormatCheck {
                        valid: false,
                        issues: vec![format!("Error reading file: {}", message)],
                    },
                ));
            }
        }
        checks
    }

    /// Delete every zero-length file of `kind`. With `dry_run`, only list
    /// them. A failed delete is recorded and the rest still proceed.
    pub fn remove_empty(&self, kind: ContentKind, dry_run: bool) -> Cleanup {
        let (files, _, _) = self.files(&self.dir(kind));
        let mut cleanup = Cleanup {
            dry_run,
            ..Cleanup::default()
        };

        for file in files.into_iter().filter(ContentFile::is_empty) {
            if dry_run {
                tracing::info!(file = %file.file_name, "would delete empty file");
                cleanup.removed.push(file.file_name);
                continue;
            }
            match std::fs::remove_file(&file.path) {
                Ok(()) => {
                    tracing::info!(file = %file.file_name, "deleted empty file");
                    cleanup.removed.push(file.file_name);
                }
                Err(e) => {
                    let issue = ContentIssue::DeleteFailure {
                        path: file.path,
                        message: e.to_string(),
                    };
                    tracing::warn!(%issue);
                    cleanup.failures.push(issue);
                }
            }
        }
        cleanup
    }
}

/// Check one file against the strict format: it must be non-empty and
/// contain the literal `Title:` and `Content:` markers. Stricter than the
/// parser, and used only for reporting.
pub fn validate_format(path: &Path) -> FormatCheck {
    match std::fs::read(path) {
        Ok(bytes) => check_text(&bytes),
        Err(e) => FormatCheck {
            valid: false,
            issues: vec![format!("Error reading file: {}", e)],
        },
    }
}

fn check_text(bytes: &[u8]) -> FormatCheck {
    let text = portfolio_content_core::parse::decode_bytes(bytes);
    if text.trim().is_empty() {
        return FormatCheck {
            valid: false,
            issues: vec!["File is empty".to_string()],
        };
    }
    let mut issues = Vec::new();
    if !text.contains("Title:") {
        issues.push("Missing 'Title:' field".to_string());
    }
    if !text.contains("Content:") {
        issues.push("Missing 'Content:' field".to_string());
    }
    FormatCheck {
        valid: issues.is_empty(),
        issues,
    }
}

fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
