//! Listing a content set.

use anyhow::Result;
use portfolio_content_core::models::ContentKind;

use crate::assembler::ContentService;

/// Load `kind` and print one line per record, most recent first.
pub fn run_list(service: &ContentService, kind: ContentKind, json: bool) -> Result<()> {
    let set = service.load(kind);

    if json {
        println!("{}", serde_json::to_string_pretty(set.records())?);
        return Ok(());
    }

    if set.is_empty() {
        println!("No {} found.", kind);
        return Ok(());
    }

    println!("{:<12} {:<32} {}", "DATE", "SLUG", "TITLE");
    println!("{}", "-".repeat(76));
    for record in &set {
        println!("{:<12} {:<32} {}", record.date, record.slug, record.title);
    }
    println!();
    println!("{} {} (source: {})", set.len(), kind, set.origin().as_str());

    Ok(())
}
