//! # Portfolio Content Core
//!
//! Shared, I/O-free logic for the portfolio content pipeline: data models,
//! the metadata-block parser, record normalization, and the legacy
//! bracket-delimited aggregate format.
//!
//! This crate never touches the filesystem. Callers hand it decoded text
//! (or raw bytes) plus file provenance, and get typed records back.
//!
//! ```rust
//! use portfolio_content_core::parse::parse_block;
//!
//! let block = parse_block("Title: Rain\n---\nSoft rain.");
//! assert_eq!(block.metadata.get("title").map(String::as_str), Some("Rain"));
//! assert_eq!(block.body, "Soft rain.");
//! ```

pub mod legacy;
pub mod models;
pub mod normalize;
pub mod parse;
