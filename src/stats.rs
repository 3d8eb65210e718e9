//! Content statistics.
//!
//! A quick summary of what the site would render: record counts per kind,
//! where each set came from, the newest date, and how many recoverable
//! issues the load hit. Used by `folio stats`.

use anyhow::Result;
use portfolio_content_core::models::ContentKind;
use serde::Serialize;

use crate::assembler::{ContentLibrary, ContentService, SetOrigin};

/// Per-kind breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct KindStats {
    pub kind: ContentKind,
    pub origin: SetOrigin,
    pub records: usize,
    pub latest_date: Option<String>,
    pub body_bytes: u64,
    pub issues: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentStats {
    pub kinds: Vec<KindStats>,
    pub total_records: usize,
}

/// Compute stats for an already loaded library.
pub fn library_stats(library: &ContentLibrary) -> ContentStats {
    let kinds: Vec<KindStats> = library
        .sets()
        .into_iter()
        .map(|set| KindStats {
            kind: set.kind(),
            origin: set.origin(),
            records: set.len(),
            latest_date: set.records().first().map(|r| r.date.clone()),
            body_bytes: set.iter().map(|r| r.body.len() as u64).sum(),
            issues: set.issues().len(),
        })
        .collect();
    let total_records = kinds.iter().map(|k| k.records).sum();
    ContentStats {
        kinds,
        total_records,
    }
}

/// Run the stats command: load everything and print a summary.
pub fn run_stats(service: &ContentService) -> Result<()> {
    let stats = library_stats(&service.load_all());

    println!("Portfolio Content — Stats");
    println!("=========================");
    println!();
    println!("  Content root: {}", service.config().content.root.display());
    println!("  Records:      {}", stats.total_records);
    println!();
    println!(
        "  {:<8} {:<10} {:>7} {:>10} {:>7}   {}",
        "KIND", "SOURCE", "RECORDS", "SIZE", "ISSUES", "LATEST"
    );
    println!("  {}", "-".repeat(64));
    for k in &stats.kinds {
        println!(
            "  {:<8} {:<10} {:>7} {:>10} {:>7}   {}",
            k.kind.to_string(),
            k.origin.as_str(),
            k.records,
            format_bytes(k.body_bytes),
            k.issues,
            k.latest_date.as_deref().unwrap_or("-")
        );
    }
    println!();

    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_library_stats() {
        let tmp = TempDir::new().unwrap();
        let poems = tmp.path().join("poems");
        fs::create_dir_all(&poems).unwrap();
        fs::write(poems.join("a.txt"), "Date: 2025-01-01\n---\nabc").unwrap();
        fs::write(poems.join("b.txt"), "Date: 2025-02-01\n---\nde").unwrap();

        let service = ContentService::new(Config::with_root(tmp.path())).unwrap();
        let stats = library_stats(&service.load_all());
        assert_eq!(stats.total_records, 2);
        let poem_stats = &stats.kinds[0];
        assert_eq!(poem_stats.records, 2);
        assert_eq!(poem_stats.origin, SetOrigin::Directory);
        assert_eq!(poem_stats.latest_date.as_deref(), Some("2025-02-01"));
        assert_eq!(poem_stats.body_bytes, 5);
        let blog_stats = &stats.kinds[1];
        assert_eq!(blog_stats.origin, SetOrigin::Empty);
        assert_eq!(blog_stats.issues, 1);
    }
}
