//! Export loaded content as JSON for the site renderer.
//!
//! Produces a single document holding both content sets, records
//! flattened to plain fields, so templates and the static exporter can
//! render pages without touching the content directories.

use anyhow::Result;
use chrono::Utc;
use portfolio_content_core::models::ContentRecord;
use serde::Serialize;
use std::path::Path;

use crate::assembler::{ContentLibrary, ContentService, ContentSet, SetOrigin};

#[derive(Serialize)]
struct ExportData<'a> {
    generated_at: String,
    poems: ExportSet<'a>,
    blogs: ExportSet<'a>,
}

#[derive(Serialize)]
struct ExportSet<'a> {
    origin: SetOrigin,
    count: usize,
    records: &'a [ContentRecord],
}

impl<'a> From<&'a ContentSet> for ExportSet<'a> {
    fn from(set: &'a ContentSet) -> Self {
        Self {
            origin: set.origin(),
            count: set.len(),
            records: set.records(),
        }
    }
}

/// Serialize a library to pretty JSON.
pub fn export_json(library: &ContentLibrary) -> Result<String> {
    let data = ExportData {
        generated_at: Utc::now().to_rfc3339(),
        poems: (&library.poems).into(),
        blogs: (&library.blogs).into(),
    };
    Ok(serde_json::to_string_pretty(&data)?)
}

/// Load all content and export it.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping.
pub fn run_export(service: &ContentService, output: Option<&Path>) -> Result<()> {
    let library = service.load_all();
    let json = export_json(&library)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &json)?;
            eprintln!(
                "Exported {} poems, {} blogs to {}",
                library.poems.len(),
                library.blogs.len(),
                path.display()
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}
