//! Recoverable conditions met while loading or maintaining content.
//!
//! None of these stop a load: the affected file or block simply
//! contributes nothing. They are logged as they happen and kept on the
//! result so callers (and tests) can inspect them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentIssue {
    #[error("content directory does not exist: {}", .path.display())]
    DirectoryMissing { path: PathBuf },

    #[error("could not read {}: {message}", .path.display())]
    ReadFailure { path: PathBuf, message: String },

    #[error("{} is not valid UTF-8; decoded as Latin-1", .path.display())]
    Latin1Fallback { path: PathBuf },

    #[error("legacy file {} unavailable: {message}", .path.display())]
    LegacyUnavailable { path: PathBuf, message: String },

    #[error("skipped malformed block #{position} in legacy file {}", .path.display())]
    MalformedLegacyBlock { path: PathBuf, position: usize },

    #[error("slug '{slug}' from {replaced_by} replaces the record from {replaced}")]
    SlugCollision {
        slug: String,
        replaced: String,
        replaced_by: String,
    },

    #[error("failed to delete {}: {message}", .path.display())]
    DeleteFailure { path: PathBuf, message: String },
}
