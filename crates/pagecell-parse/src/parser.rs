//! The parse engine seam
//!
//! [`Parser::parse`] is the single synchronous entry point the bridge forwards
//! to. The resources directory is part of [`ParseConfig`] rather than
//! process-global state, so concurrent parses do not contend on shared
//! configuration.

use crate::types::{DocumentInfo, Page, ParseResult, US_LETTER_HEIGHT, US_LETTER_WIDTH};
use crate::{Error, Result};
use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

/// PDF header magic; anything else is rejected before parsing.
const PDF_MAGIC: [u8; 5] = *b"%PDF-";

/// Configuration for a single parse call.
///
/// Every parse is self-contained: input, output, and support data are all
/// named here explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Path to the input PDF
    pub filename: PathBuf,

    /// Path the JSON result is written to
    pub output: PathBuf,

    /// Directory of parser support data (font/glyph tables)
    pub resources_dir: PathBuf,
}

/// A parser for PDF documents
pub struct Parser {
    loglevel: String,
}

impl Parser {
    /// Create a new parser with the specified log level
    ///
    /// Valid log levels: "debug", "info", "warn", "error", "off"
    #[must_use = "this function returns a parser that should be used"]
    pub fn new(loglevel: &str) -> Self {
        Parser {
            loglevel: loglevel.to_string(),
        }
    }

    /// Parse a document and write the JSON result to `config.output`.
    ///
    /// The input must exist and carry the `%PDF-` header. The resources
    /// directory must exist before the engine runs.
    ///
    /// Cell extraction is not wired up yet: the result reports a single
    /// US-Letter page with no cells.
    pub fn parse(&self, config: &ParseConfig) -> Result<ParseResult> {
        log::debug!(
            "parse (loglevel {}): {} -> {}",
            self.loglevel,
            config.filename.display(),
            config.output.display()
        );

        if !config.resources_dir.is_dir() {
            return Err(Error::ParseFailed(format!(
                "resources directory does not exist: {}",
                config.resources_dir.display()
            )));
        }

        let mut file = fs::File::open(&config.filename).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(config.filename.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;

        let mut header = [0u8; PDF_MAGIC.len()];
        if file.read_exact(&mut header).is_err() || header != PDF_MAGIC {
            return Err(Error::InvalidPdf(config.filename.display().to_string()));
        }

        let result = ParseResult {
            info: DocumentInfo {
                filename: config.filename.to_string_lossy().into_owned(),
                num_pages: 1,
            },
            pages: vec![Page {
                page_number: 1,
                width: US_LETTER_WIDTH,
                height: US_LETTER_HEIGHT,
                cells: Vec::new(),
            }],
        };

        let out = fs::File::create(&config.output)?;
        let mut writer = BufWriter::new(out);
        serde_json::to_writer(&mut writer, &result)?;
        writer.flush()?;

        log::debug!("parse completed: {}", config.output.display());
        Ok(result)
    }
}
