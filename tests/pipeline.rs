//! Library-level tests for the content pipeline: loading, fallbacks,
//! ordering, lookup, and integrity scanning over real directories.

use portfolio_content::assembler::{ContentService, SetOrigin};
use portfolio_content::config::Config;
use portfolio_content::integrity::IntegrityChecker;
use portfolio_content::issue::ContentIssue;
use portfolio_content::{ContentKind, RecordOrigin};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn setup_content() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("content");
    fs::create_dir_all(root.join("poems")).unwrap();
    fs::create_dir_all(root.join("blogs")).unwrap();
    (tmp, root)
}

fn service(root: &Path) -> ContentService {
    ContentService::new(Config::with_root(root)).unwrap()
}

#[test]
fn well_formed_file_round_trips() {
    let (_tmp, root) = setup_content();
    fs::write(
        root.join("poems").join("x.txt"),
        "Title: X\nDate: 2025-01-01\nTags: a, b\n---\nBody text",
    )
    .unwrap();

    let set = service(&root).load(ContentKind::Poem);
    assert_eq!(set.len(), 1);
    let record = set.get("x").unwrap();
    assert_eq!(record.title, "X");
    assert_eq!(record.date, "2025-01-01");
    assert_eq!(record.tags, vec!["a", "b"]);
    assert_eq!(record.body, "Body text");
    assert_eq!(record.kind, ContentKind::Poem);
    assert_eq!(record.origin, RecordOrigin::Directory);
    assert!(record.modified_at.is_some());
}

#[test]
fn file_without_separator_is_all_body() {
    let (_tmp, root) = setup_content();
    fs::write(
        root.join("poems").join("plain_verse.txt"),
        "\n\nRoses are red:\nviolets are blue.\n\n",
    )
    .unwrap();

    let set = service(&root).load(ContentKind::Poem);
    let record = set.get("plain_verse").unwrap();
    assert_eq!(record.body, "Roses are red:\nviolets are blue.");
    assert_eq!(record.title, "Plain Verse");
    assert!(record.tags.is_empty());
}

#[test]
fn empty_file_loads_with_derived_fields() {
    let (_tmp, root) = setup_content();
    let path = root.join("blogs").join("draft-notes.txt");
    fs::write(&path, "").unwrap();

    let set = service(&root).load(ContentKind::Blog);
    assert_eq!(set.len(), 1);
    let record = set.get("draft-notes").unwrap();
    assert_eq!(record.body, "");
    assert_eq!(record.title, "Draft Notes");
    assert_eq!(record.summary.as_deref(), Some(""));

    let mtime = fs::metadata(&path).unwrap().modified().unwrap();
    let expected = chrono::DateTime::<chrono::Local>::from(mtime)
        .format("%Y-%m-%d")
        .to_string();
    assert_eq!(record.date, expected);
}

#[test]
fn latin1_file_is_decoded() {
    let (_tmp, root) = setup_content();
    fs::write(root.join("poems").join("cafe.txt"), b"Title: Caf\xe9\n---\nna\xefve").unwrap();

    let set = service(&root).load(ContentKind::Poem);
    let record = set.get("cafe").unwrap();
    assert_eq!(record.title, "Café");
    assert_eq!(record.body, "naïve");
    assert!(set
        .issues()
        .iter()
        .any(|i| matches!(i, ContentIssue::Latin1Fallback { .. })));
}

#[test]
fn only_matching_extensions_are_ingested() {
    let (_tmp, root) = setup_content();
    let poems = root.join("poems");
    fs::write(poems.join("dawn.txt"), "Title: Dawn\n---\nlight").unwrap();
    fs::write(poems.join("dawn.md"), "Title: Dawn (md)\n---\nignored").unwrap();
    fs::write(poems.join("dusk.txt"), "Title: Dusk\n---\ndark").unwrap();

    let set = service(&root).load(ContentKind::Poem);
    assert_eq!(set.len(), 2);
    assert_eq!(set.get("dawn").unwrap().title, "Dawn");
    assert!(set.get("dusk").is_some());
}

#[test]
fn records_sorted_by_date_descending() {
    let (_tmp, root) = setup_content();
    let blogs = root.join("blogs");
    for (name, date) in [
        ("old", "2021-05-01"),
        ("newest", "2025-12-31"),
        ("middle", "2023-07-15"),
        ("also-middle", "2023-07-15"),
    ] {
        fs::write(
            blogs.join(format!("{}.txt", name)),
            format!("Date: {}\n---\nText for {}.", date, name),
        )
        .unwrap();
    }

    let set = service(&root).load(ContentKind::Blog);
    assert_eq!(set.len(), 4);
    for pair in set.records().windows(2) {
        assert!(pair[0].date >= pair[1].date);
    }
    assert_eq!(set.records()[0].slug, "newest");
    assert_eq!(set.records()[3].slug, "old");
}

#[test]
fn long_first_paragraph_summary_is_truncated() {
    let (_tmp, root) = setup_content();
    let paragraph = "Streaming pipelines turn raw events into features ".repeat(6);
    fs::write(
        root.join("blogs").join("pipelines.txt"),
        format!("Title: Pipelines\n---\n## Intro\n\n{}\n\nSecond paragraph.", paragraph),
    )
    .unwrap();
    fs::write(
        root.join("blogs").join("intro-first.txt"),
        format!("Title: Intro first\n---\n{}\n\nSecond paragraph.", paragraph),
    )
    .unwrap();

    let set = service(&root).load(ContentKind::Blog);
    assert_eq!(set.get("pipelines").unwrap().summary.as_deref(), Some("Intro"));

    let summary = set.get("intro-first").unwrap().summary.clone().unwrap();
    assert!(summary.ends_with("..."));
    assert!(summary.chars().count() <= 150 + 3);
    let kept = summary.trim_end_matches("...");
    assert!(paragraph.starts_with(kept));
    let next = &paragraph[kept.len()..];
    assert!(next.starts_with(' '), "cut mid-word: {:?}", kept);
}

#[test]
fn legacy_file_used_when_directory_empty() {
    let (tmp, root) = setup_content();
    fs::write(root.join("poems").join("notes.md"), "not a poem").unwrap();
    let legacy = tmp.path().join("Poems.txt");
    fs::write(
        &legacy,
        "[Digital Dreams]\nIn circuits deep and silicon vast.\n\n[The Road, Not Taken.]\nTwo roads diverged.\n",
    )
    .unwrap();

    let mut config = Config::with_root(&root);
    config.poems.legacy_file = Some(legacy);
    let set = ContentService::new(config).unwrap().load(ContentKind::Poem);

    assert_eq!(set.origin(), SetOrigin::Legacy);
    assert_eq!(set.len(), 2);
    let road = set.get("the-road-not-taken").unwrap();
    assert_eq!(road.title, "The Road, Not Taken.");
    assert_eq!(road.body, "Two roads diverged.");
    assert_eq!(road.origin, RecordOrigin::Legacy);
    assert_eq!(road.source_file.as_deref(), Some("Poems.txt"));
    assert!(set.get("digital-dreams").is_some());
}

#[test]
fn legacy_file_ignored_when_directory_has_records() {
    let (tmp, root) = setup_content();
    fs::write(root.join("poems").join("one.txt"), "only").unwrap();
    let legacy = tmp.path().join("Poems.txt");
    fs::write(&legacy, "[Legacy]\nold").unwrap();

    let mut config = Config::with_root(&root);
    config.poems.legacy_file = Some(legacy);
    let set = ContentService::new(config).unwrap().load(ContentKind::Poem);

    assert_eq!(set.origin(), SetOrigin::Directory);
    assert_eq!(set.len(), 1);
    assert!(set.get("legacy").is_none());
}

#[test]
fn malformed_legacy_blocks_are_skipped() {
    let (tmp, root) = setup_content();
    let legacy = tmp.path().join("Poems.txt");
    fs::write(&legacy, "[Broken title\nno close\n[Whole]\nfine").unwrap();

    let mut config = Config::with_root(&root);
    config.poems.legacy_file = Some(legacy);
    let set = ContentService::new(config).unwrap().load(ContentKind::Poem);

    assert_eq!(set.len(), 1);
    assert!(set.get("whole").is_some());
    assert!(set
        .issues()
        .iter()
        .any(|i| matches!(i, ContentIssue::MalformedLegacyBlock { position: 1, .. })));
}

#[test]
fn missing_directory_loads_empty() {
    let tmp = TempDir::new().unwrap();
    let set = service(&tmp.path().join("nowhere")).load(ContentKind::Poem);
    assert!(set.is_empty());
    assert_eq!(set.origin(), SetOrigin::Empty);
}

#[test]
fn lookup_miss_is_none() {
    let (_tmp, root) = setup_content();
    fs::write(root.join("poems").join("present.txt"), "here").unwrap();
    let set = service(&root).load(ContentKind::Poem);
    assert!(set.get("nonexistent-slug").is_none());
    assert!(set.get("present").is_some());
}

#[test]
fn each_load_rereads_the_filesystem() {
    let (_tmp, root) = setup_content();
    let service = service(&root);
    assert!(service.load(ContentKind::Blog).is_empty());

    fs::write(root.join("blogs").join("fresh.txt"), "Title: Fresh\n---\nnew").unwrap();
    let set = service.load(ContentKind::Blog);
    assert_eq!(set.len(), 1);
    assert_eq!(set.get("fresh").unwrap().title, "Fresh");
}

#[test]
fn integrity_scan_finds_one_duplicate_pair() {
    let (_tmp, root) = setup_content();
    let poems = root.join("poems");
    fs::write(poems.join("a.txt"), "Title: Twin\n---\nsame words").unwrap();
    fs::write(poems.join("b.txt"), "Title: Twin\n---\nsame words").unwrap();
    fs::write(poems.join("c.txt"), "Title: Other\n---\ndifferent").unwrap();

    let checker = IntegrityChecker::new(Config::with_root(&root)).unwrap();
    let report = checker.scan(ContentKind::Poem);

    assert_eq!(report.total_files, 3);
    assert!(report.empty_files.is_empty());
    assert_eq!(report.valid_files.len(), 3);
    assert_eq!(report.duplicate_pairs.len(), 1);
    let pair = &report.duplicate_pairs[0];
    assert_eq!((pair.file_a.as_str(), pair.file_b.as_str()), ("a.txt", "b.txt"));
    assert_eq!(pair.hash.len(), 64);
}

#[test]
fn cleanup_never_runs_during_load() {
    let (_tmp, root) = setup_content();
    let empty = root.join("poems").join("empty.txt");
    fs::write(&empty, "").unwrap();

    let set = service(&root).load(ContentKind::Poem);
    assert_eq!(set.len(), 1);
    assert!(empty.exists());

    let checker = IntegrityChecker::new(Config::with_root(&root)).unwrap();
    let cleanup = checker.remove_empty(ContentKind::Poem, false);
    assert_eq!(cleanup.removed, vec!["empty.txt"]);
    assert!(!empty.exists());
    assert!(service(&root).load(ContentKind::Poem).is_empty());
}
