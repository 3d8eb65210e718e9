//! TOML configuration.
//!
//! Every field has a default, so an empty file (or no file at all, via
//! [`Config::minimal`]) describes the conventional layout: `content/poems`
//! and `content/blogs` holding `*.txt` files, with `Poems.txt` as the
//! legacy poem aggregate.

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use portfolio_content_core::models::ContentKind;
use portfolio_content_core::normalize::{NormalizeOptions, DEFAULT_ELLIPSIS, DEFAULT_SUMMARY_CHARS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub poems: PoemsConfig,
    #[serde(default)]
    pub blogs: BlogsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_include_glob")]
    pub include_glob: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            include_glob: default_include_glob(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("content")
}
fn default_include_glob() -> String {
    "*.txt".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SummaryConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_ellipsis")]
    pub ellipsis: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            ellipsis: default_ellipsis(),
        }
    }
}

fn default_max_chars() -> usize {
    DEFAULT_SUMMARY_CHARS
}
fn default_ellipsis() -> String {
    DEFAULT_ELLIPSIS.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PoemsConfig {
    /// Relative paths resolve under `content.root`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Relative paths resolve against the working directory. An empty
    /// string disables the legacy fallback.
    #[serde(default = "default_poems_legacy")]
    pub legacy_file: Option<PathBuf>,
    #[serde(default)]
    pub fallback: Vec<FallbackRecord>,
}

impl Default for PoemsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            legacy_file: default_poems_legacy(),
            fallback: Vec::new(),
        }
    }
}

fn default_poems_legacy() -> Option<PathBuf> {
    Some(PathBuf::from("Poems.txt"))
}

#[derive(Debug, Deserialize, Clone)]
pub struct BlogsConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub legacy_file: Option<PathBuf>,
    #[serde(default)]
    pub fallback: Vec<FallbackRecord>,
    #[serde(default = "default_author")]
    pub default_author: String,
    #[serde(default = "default_category")]
    pub default_category: String,
}

impl Default for BlogsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            legacy_file: None,
            fallback: Vec::new(),
            default_author: default_author(),
            default_category: default_category(),
        }
    }
}

fn default_author() -> String {
    NormalizeOptions::default().default_author
}
fn default_category() -> String {
    NormalizeOptions::default().default_category
}

/// A static record used when a kind has neither files nor a legacy file.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FallbackRecord {
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Defaults to the load date.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Defaults to a slug of the title.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Resolved sources for one content kind.
#[derive(Debug, Clone)]
pub struct KindSource {
    pub kind: ContentKind,
    pub dir: PathBuf,
    pub legacy_file: Option<PathBuf>,
    pub fallback: Vec<FallbackRecord>,
}

impl Config {
    /// Configuration used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Same defaults, rooted at `root`, with no legacy file.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.content.root = root.into();
        config.poems.legacy_file = None;
        config
    }

    pub fn source(&self, kind: ContentKind) -> KindSource {
        let (dir, legacy_file, fallback) = match kind {
            ContentKind::Poem => (&self.poems.dir, &self.poems.legacy_file, &self.poems.fallback),
            ContentKind::Blog => (&self.blogs.dir, &self.blogs.legacy_file, &self.blogs.fallback),
        };
        let dir = match dir {
            Some(d) if d.is_absolute() => d.clone(),
            Some(d) => self.content.root.join(d),
            None => self.content.root.join(kind.dir_name()),
        };
        KindSource {
            kind,
            dir,
            legacy_file: legacy_file
                .as_ref()
                .filter(|p| !p.as_os_str().is_empty())
                .cloned(),
            fallback: fallback.clone(),
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            summary_chars: self.summary.max_chars,
            ellipsis: self.summary.ellipsis.clone(),
            default_author: self.blogs.default_author.clone(),
            default_category: self.blogs.default_category.clone(),
        }
    }

    /// File-name matcher for content files.
    pub fn include_matcher(&self) -> Result<GlobMatcher> {
        let glob = Glob::new(&self.content.include_glob).with_context(|| {
            format!("Invalid content.include_glob: '{}'", self.content.include_glob)
        })?;
        Ok(glob.compile_matcher())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    config.include_matcher()?;

    if config.summary.max_chars <= config.summary.ellipsis.chars().count() {
        anyhow::bail!(
            "summary.max_chars ({}) must be greater than the ellipsis length",
            config.summary.max_chars
        );
    }

    for kind in ContentKind::ALL {
        for (i, record) in config.source(kind).fallback.iter().enumerate() {
            if record.title.trim().is_empty() {
                anyhow::bail!("{}.fallback[{}].title must not be empty", kind, i);
            }
        }
    }

    Ok(())
}
