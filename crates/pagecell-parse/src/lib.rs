//! # pagecell-parse — safe parser layer for the pagecell bridge
//!
//! This crate holds the document model, error types, and parse engine that
//! sit behind the `pagecell-ffi` C surface:
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                 foreign caller                │
//! └───────────────────────────────────────────────┘
//!                        │  C ABI
//!                        ▼
//! ┌───────────────────────────────────────────────┐
//! │                 pagecell-ffi                  │
//! │   handles, C page/cell layouts, error slot    │
//! └───────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌───────────────────────────────────────────────┐
//! │                pagecell-parse                 │
//! │   Document lifecycle, export, parse engine    │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! [`Document`] owns an opened document's path and configuration tree.
//! [`Parser`] is the engine seam: given a [`ParseConfig`] it validates the
//! input, writes the JSON result beside it, and returns the structured
//! [`ParseResult`]. Page counting and cell extraction currently report
//! placeholder values (a single US-Letter page with no cells); the export
//! path, the on-disk JSON contract, and every error path are real.

pub mod document;
pub mod error;
pub mod parser;
pub mod types;

pub use document::{Document, DEFAULT_RESOURCES_DIR, RESOURCES_DIR_ENV};
pub use error::{Error, Result};
pub use parser::{ParseConfig, Parser};
pub use types::{DocumentInfo, Page, ParseResult, TextCell, US_LETTER_HEIGHT, US_LETTER_WIDTH};
