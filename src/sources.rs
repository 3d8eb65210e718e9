use anyhow::Result;
use portfolio_content_core::models::ContentKind;

use crate::config::Config;

/// Print where each kind's content comes from and whether it is there.
pub fn list_sources(config: &Config) -> Result<()> {
    println!("{:<8} {:<10} {:<10} PATH", "KIND", "SOURCE", "STATUS");

    for kind in ContentKind::ALL {
        let source = config.source(kind);
        let kind_name = kind.to_string();

        let dir_status = if source.dir.is_dir() { "OK" } else { "MISSING" };
        println!(
            "{:<8} {:<10} {:<10} {}",
            kind_name,
            "directory",
            dir_status,
            source.dir.display()
        );

        match &source.legacy_file {
            Some(path) => {
                let status = if path.is_file() { "OK" } else { "MISSING" };
                println!("{:<8} {:<10} {:<10} {}", kind_name, "legacy", status, path.display());
            }
            None => println!("{:<8} {:<10} {:<10} -", kind_name, "legacy", "NONE"),
        }

        println!(
            "{:<8} {:<10} {:<10} {} configured",
            kind_name,
            "fallback",
            if source.fallback.is_empty() { "NONE" } else { "OK" },
            source.fallback.len()
        );
    }

    Ok(())
}
