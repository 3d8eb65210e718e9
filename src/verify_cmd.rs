//! Maintenance commands: `folio verify` and `folio clean`.
//!
//! Thin CLI wrappers over [`IntegrityChecker`]. `clean` only deletes with
//! `--apply`; without it, it prints what would go.

use anyhow::Result;
use portfolio_content_core::models::ContentKind;
use serde::Serialize;

use crate::config::Config;
use crate::integrity::{FormatCheck, IntegrityChecker, IntegrityReport};

#[derive(Serialize)]
struct KindVerification {
    kind: ContentKind,
    report: IntegrityReport,
    format: Vec<FileFormat>,
}

#[derive(Serialize)]
struct FileFormat {
    file_name: String,
    #[serde(flatten)]
    check: FormatCheck,
}

fn selected(kind: Option<ContentKind>) -> Vec<ContentKind> {
    match kind {
        Some(k) => vec![k],
        None => ContentKind::ALL.to_vec(),
    }
}

/// Print an integrity and format report for one kind, or all of them.
pub fn run_verify(config: &Config, kind: Option<ContentKind>, json: bool) -> Result<()> {
    let checker = IntegrityChecker::new(config.clone())?;

    let results: Vec<KindVerification> = selected(kind)
        .into_iter()
        .map(|kind| KindVerification {
            kind,
            report: checker.scan(kind),
            format: checker
                .validate_directory(kind)
                .into_iter()
                .map(|(file_name, check)| FileFormat { file_name, check })
                .collect(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("Content Verification Report");
    println!("===========================");

    let mut total_empty = 0;
    let mut total_duplicates = 0;
    for v in &results {
        let r = &v.report;
        println!();
        println!("  {} ({})", v.kind, r.directory.display());
        println!("  {}", "-".repeat(60));
        if r.directory_missing {
            println!("  directory not found");
            continue;
        }
        println!("  Total files: {}", r.total_files);
        println!("  Valid files: {}", r.valid_files.len());
        println!("  Empty files: {}", r.empty_files.len());
        println!("  Duplicates:  {}", r.duplicate_pairs.len());

        if !r.empty_files.is_empty() {
            println!();
            println!("  Empty files:");
            for name in &r.empty_files {
                println!("    - {}", name);
            }
        }
        if !r.duplicate_pairs.is_empty() {
            println!();
            println!("  Duplicates:");
            for pair in &r.duplicate_pairs {
                println!("    - {} == {}", pair.file_a, pair.file_b);
            }
        }

        let strict_failures: Vec<&FileFormat> = v.format.iter().filter(|f| !f.check.valid).collect();
        if !strict_failures.is_empty() {
            println!();
            println!("  Strict format issues:");
            for f in strict_failures {
                println!("    - {}: {}", f.file_name, f.check.issues.join("; "));
            }
        }

        total_empty += r.empty_files.len();
        total_duplicates += r.duplicate_pairs.len();
    }

    println!();
    println!("  Summary: {} empty, {} duplicates", total_empty, total_duplicates);
    if total_empty > 0 {
        println!("  Run `folio clean --apply` to remove empty files.");
    }
    if total_duplicates > 0 {
        println!("  Review duplicate files and remove them by hand.");
    }

    Ok(())
}

/// Remove (or, without `apply`, list) zero-length content files.
pub fn run_clean(config: &Config, kind: Option<ContentKind>, apply: bool) -> Result<()> {
    let checker = IntegrityChecker::new(config.clone())?;
    let verb = if apply { "Deleted" } else { "Would delete" };

    let mut failures = 0;
    for kind in selected(kind) {
        let cleanup = checker.remove_empty(kind, !apply);
        for name in &cleanup.removed {
            println!("{} {}/{}", verb, kind, name);
        }
        for issue in &cleanup.failures {
            eprintln!("Warning: {}", issue);
        }
        println!("{}: {} {} empty file(s)", kind, verb.to_lowercase(), cleanup.removed.len());
        failures += cleanup.failures.len();
    }

    if !apply {
        println!("Dry run. Re-run with --apply to delete.");
    }
    if failures > 0 {
        anyhow::bail!("{} file(s) could not be deleted", failures);
    }
    Ok(())
}
