//! # Portfolio Content
//!
//! The content layer of a personal portfolio site: poems and blog posts
//! stored as flat text files, loaded into ordered, slug-addressable
//! content sets for the site renderer.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────────────┐   ┌────────────┐
//! │  Scanner  │──▶│ Parse + Normalize │──▶│ ContentSet │──▶ renderer / export
//! │ content/* │   │   (core crate)    │   │ sorted+idx │
//! └───────────┘   └──────────────────┘   └────────────┘
//!       │                  ▲
//!       │        legacy Poems.txt / configured fallbacks
//!       ▼
//! ┌──────────────────┐
//! │ IntegrityChecker │  empties, duplicates, strict format (offline)
//! └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! folio sources                 # where content comes from
//! folio list poems              # newest first
//! folio get blogs my-first-post
//! folio export --output dist/content.json
//! folio verify                  # empty files, duplicates, format
//! folio clean --apply           # delete empty files
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`scanner`] | Directory scanning |
//! | [`assembler`] | Content set loading, fallbacks, lookup |
//! | [`integrity`] | Empty/duplicate/format checks and cleanup |
//! | [`issue`] | Recoverable load and maintenance conditions |
//! | [`export`] | JSON export for the renderer |
//! | [`stats`] | Content statistics |

pub mod assembler;
pub mod config;
pub mod export;
pub mod get;
pub mod integrity;
pub mod issue;
pub mod list;
pub mod scanner;
pub mod sources;
pub mod stats;
pub mod verify_cmd;

pub use portfolio_content_core::models::{ContentKind, ContentRecord, RecordOrigin};
