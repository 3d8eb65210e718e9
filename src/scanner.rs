//! Content file scanner.
//!
//! Enumerates the files of one content directory (non-recursive) whose
//! names match the configured include glob, reading each file's bytes and
//! timestamps as the iterator advances. Enumeration order is whatever the
//! filesystem returns; callers that need an order sort afterwards.

use chrono::{DateTime, Utc};
use globset::GlobMatcher;
use portfolio_content_core::models::FileStamps;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use crate::issue::ContentIssue;

/// One content file, read in full.
#[derive(Debug, Clone)]
pub struct ContentFile {
    pub path: PathBuf,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub stamps: FileStamps,
}

impl ContentFile {
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Lazy sequence of [`ContentFile`]s from one directory.
///
/// A file that cannot be read yields a [`ContentIssue::ReadFailure`] in
/// its place; the scan continues with the next file.
pub struct ContentFiles {
    dir: PathBuf,
    walker: Option<walkdir::IntoIter>,
    matcher: GlobMatcher,
}

impl ContentFiles {
    /// `Some(dir)` if the scanned directory does not exist.
    pub fn missing_dir(&self) -> Option<&Path> {
        self.walker.is_none().then_some(self.dir.as_path())
    }
}

impl Iterator for ContentFiles {
    type Item = Result<ContentFile, ContentIssue>;

    fn next(&mut self) -> Option<Self::Item> {
        let walker = self.walker.as_mut()?;
        for entry in walker.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| self.dir.clone());
                    return Some(Err(ContentIssue::ReadFailure {
                        path,
                        message: e.to_string(),
                    }));
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().to_string();
            if !self.matcher.is_match(&file_name) {
                continue;
            }
            return Some(read_content_file(entry.path(), file_name));
        }
        None
    }
}

/// Scan `dir` for files whose names match `matcher`.
///
/// A missing directory is not an error: the sequence is empty, a warning
/// is logged, and [`ContentFiles::missing_dir`] reports it.
pub fn scan_dir(dir: &Path, matcher: &GlobMatcher) -> ContentFiles {
    let walker = if dir.is_dir() {
        Some(
            WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .into_iter(),
        )
    } else {
        tracing::warn!(dir = %dir.display(), "content directory not found");
        None
    };
    ContentFiles {
        dir: dir.to_path_buf(),
        walker,
        matcher: matcher.clone(),
    }
}

fn read_content_file(path: &Path, file_name: String) -> Result<ContentFile, ContentIssue> {
    let read_failure = |e: std::io::Error| ContentIssue::ReadFailure {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let metadata = std::fs::metadata(path).map_err(read_failure)?;
    let bytes = std::fs::read(path).map_err(read_failure)?;

    let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    let created = metadata.created().ok();

    Ok(ContentFile {
        path: path.to_path_buf(),
        file_name,
        bytes,
        stamps: FileStamps {
            modified: DateTime::<Utc>::from(modified),
            created: created.map(DateTime::<Utc>::from),
        },
    })
}
