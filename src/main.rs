//! # Portfolio Content CLI (`folio`)
//!
//! The `folio` binary inspects, exports, and maintains the portfolio's
//! content directories.
//!
//! ## Usage
//!
//! ```bash
//! folio --config ./config/folio.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `folio sources` | Show each kind's directory, legacy file, and fallbacks |
//! | `folio list <kind>` | List a content set, newest first |
//! | `folio get <kind> <slug>` | Print one record |
//! | `folio stats` | Record counts per kind |
//! | `folio export` | Write all content as JSON |
//! | `folio verify [kind]` | Report empty files, duplicates, and format issues |
//! | `folio clean [kind]` | Delete empty files (dry run unless `--apply`) |

use clap::{Parser, Subcommand};
use portfolio_content::assembler::ContentService;
use portfolio_content::config::{self, Config};
use portfolio_content::{export, get, list, sources, stats, verify_cmd, ContentKind};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Portfolio Content CLI — load, export, and maintain the poems and blog
/// posts behind a portfolio site.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist, built-in defaults are used
/// (`content/poems`, `content/blogs`, legacy `Poems.txt`).
#[derive(Parser)]
#[command(
    name = "folio",
    about = "Portfolio content — load, export, and maintain poems and blog posts",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/folio.toml")]
    config: PathBuf,

    /// Log debug detail to stderr (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List content sources and whether they exist.
    Sources,

    /// List the records of one kind, most recent first.
    List {
        /// `poems` or `blogs`.
        kind: ContentKind,

        /// Print records as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print one record by slug.
    ///
    /// Exits with status 1 when the slug is not found.
    Get {
        /// `poems` or `blogs`.
        kind: ContentKind,

        /// Record slug (the file name without extension).
        slug: String,

        /// Print the record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show record counts, sources, and latest dates.
    Stats,

    /// Export all content as JSON for the site renderer.
    Export {
        /// Output file. Writes to stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Report empty files, duplicate files, and strict-format issues.
    Verify {
        /// Limit to one kind.
        kind: Option<ContentKind>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete zero-length content files.
    ///
    /// Without `--apply` this is a dry run that only lists the files.
    Clean {
        /// Limit to one kind.
        kind: Option<ContentKind>,

        /// Actually delete. This cannot be undone.
        #[arg(long)]
        apply: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        tracing::info!(path = %cli.config.display(), "config file not found, using defaults");
        Config::minimal()
    };

    match cli.command {
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
        Commands::List { kind, json } => {
            list::run_list(&ContentService::new(cfg)?, kind, json)?;
        }
        Commands::Get { kind, slug, json } => {
            get::run_get(&ContentService::new(cfg)?, kind, &slug, json)?;
        }
        Commands::Stats => {
            stats::run_stats(&ContentService::new(cfg)?)?;
        }
        Commands::Export { output } => {
            export::run_export(&ContentService::new(cfg)?, output.as_deref())?;
        }
        Commands::Verify { kind, json } => {
            verify_cmd::run_verify(&cfg, kind, json)?;
        }
        Commands::Clean { kind, apply } => {
            verify_cmd::run_clean(&cfg, kind, apply)?;
        }
    }

    Ok(())
}
