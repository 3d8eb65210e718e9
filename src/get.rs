//! Record retrieval by slug.
//!
//! Loads the kind's content set and looks one record up. A miss is an
//! ordinary outcome of [`ContentSet::get`]; only the CLI turns it into a
//! non-zero exit.

use anyhow::Result;
use portfolio_content_core::models::{ContentKind, ContentRecord};

use crate::assembler::{ContentService, ContentSet};

/// Load `kind` and return the record for `slug`, if any.
pub fn get_record(service: &ContentService, kind: ContentKind, slug: &str) -> Option<ContentRecord> {
    let set: ContentSet = service.load(kind);
    set.get(slug).cloned()
}

/// CLI entry point — looks the record up and prints it to stdout.
pub fn run_get(service: &ContentService, kind: ContentKind, slug: &str, json: bool) -> Result<()> {
    let record = match get_record(service, kind, slug) {
        Some(r) => r,
        None => {
            eprintln!("Error: no {} with slug '{}'", kind.as_str(), slug);
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("--- {} ---", record.title);
    println!("slug:         {}", record.slug);
    println!("date:         {}", record.date);
    if !record.tags.is_empty() {
        println!("tags:         {}", record.tags.join(", "));
    }
    if let Some(ref author) = record.author {
        println!("author:       {}", author);
    }
    if let Some(ref category) = record.category {
        println!("category:     {}", category);
    }
    if let Some(ref summary) = record.summary {
        println!("summary:      {}", summary);
    }
    println!("origin:       {:?}", record.origin);
    if let Some(ref file) = record.source_file {
        println!("source_file:  {}", file);
    }
    println!();

    println!("--- Body ---");
    println!("{}", record.body);

    Ok(())
}
