//! Document lifecycle and export
//!
//! A [`Document`] is created by [`Document::open`], queried for pages, asked
//! for a full JSON export, and dropped when the owning handle is closed.
//! Opening touches no files; a bad path only surfaces at export time.

use crate::parser::{ParseConfig, Parser};
use crate::types::{Page, US_LETTER_HEIGHT, US_LETTER_WIDTH};
use crate::{Error, Result};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Environment variable overriding the default resources directory.
pub const RESOURCES_DIR_ENV: &str = "PAGECELL_RESOURCES_DIR";

/// Default resources directory, relative to the process working directory.
pub const DEFAULT_RESOURCES_DIR: &str = "pdf_resources";

/// An open PDF document.
///
/// Owns a copy of the path, the engine configuration tree, and the result of
/// the most recent export (if any).
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    config: Value,
    resources_dir: PathBuf,
    last_result: Option<Value>,
}

impl Document {
    /// Open a document at `path`.
    ///
    /// Builds the configuration tree and resolves the resources directory
    /// from [`RESOURCES_DIR_ENV`], falling back to [`DEFAULT_RESOURCES_DIR`].
    /// The file itself is not touched until export.
    pub fn open(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::InvalidParameter("empty document path".to_string()));
        }
        log::debug!("opening document: {path}");

        let config = json!({
            "data": {},
            "files": { "pdf": { "filename": path } },
        });
        let resources_dir = std::env::var_os(RESOURCES_DIR_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_RESOURCES_DIR), PathBuf::from);

        Ok(Document {
            path: PathBuf::from(path),
            config,
            resources_dir,
            last_result: None,
        })
    }

    /// Path the document was opened with
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Engine configuration tree
    pub fn config(&self) -> &Value {
        &self.config
    }

    /// Directory of parser support data used at export time
    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Override the resources directory for this document.
    pub fn set_resources_dir(&mut self, dir: impl Into<PathBuf>) {
        self.resources_dir = dir.into();
    }

    /// Result of the most recent export, if any
    pub fn last_result(&self) -> Option<&Value> {
        self.last_result.as_ref()
    }

    /// Number of pages in the document.
    // TODO: report the real count once the engine exposes per-document metadata
    pub fn page_count(&self) -> Result<usize> {
        Ok(1)
    }

    /// Retrieve a page descriptor.
    ///
    /// Page numbers are 1-indexed. Cell extraction is not wired up, so every
    /// page comes back with US-Letter geometry and no cells.
    pub fn page(&self, page_number: i32) -> Result<Page> {
        if page_number < 1 {
            return Err(Error::InvalidPage(page_number));
        }
        Ok(Page {
            page_number,
            width: US_LETTER_WIDTH,
            height: US_LETTER_HEIGHT,
            cells: Vec::new(),
        })
    }

    /// Run the engine end-to-end and return the serialized result.
    ///
    /// The engine writes `<path>.json` beside the input; that file is read
    /// back, stored as [`Document::last_result`], and its compact
    /// serialization returned. The returned string re-parses to exactly the
    /// structured content of the written file.
    pub fn export_json(&mut self) -> Result<String> {
        if !self.resources_dir.is_dir() {
            return Err(Error::ParseFailed(format!(
                "resources directory does not exist: {}",
                self.resources_dir.display()
            )));
        }

        let output = output_path(&self.path);
        let parse_config = ParseConfig {
            filename: self.path.clone(),
            output: output.clone(),
            resources_dir: self.resources_dir.clone(),
        };

        // Keep the configuration tree in sync with what the engine ran with.
        self.config["files"]["pdf"]["output"] = json!(output.to_string_lossy());
        self.config["pdf_resource_directory"] = json!(self.resources_dir.to_string_lossy());

        Parser::new("error").parse(&parse_config)?;

        let file = std::fs::File::open(&output).map_err(|e| {
            Error::ParseFailed(format!(
                "failed to open parse output {}: {e}",
                output.display()
            ))
        })?;
        let value: Value = serde_json::from_reader(std::io::BufReader::new(file))?;

        let serialized = serde_json::to_string(&value)?;
        log::debug!("export produced {} bytes", serialized.len());
        self.last_result = Some(value);
        Ok(serialized)
    }
}

/// Derived output path: the JSON result lands beside the input.
fn output_path(input: &Path) -> PathBuf {
    let mut os = input.as_os_str().to_os_string();
    os.push(".json");
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_empty_path() {
        let err = Document::open("").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_open_does_not_touch_filesystem() {
        // The path need not exist until export.
        let doc = Document::open("definitely/absent/sample.pdf").unwrap();
        assert_eq!(doc.path(), Path::new("definitely/absent/sample.pdf"));
        assert_eq!(
            doc.config()["files"]["pdf"]["filename"],
            "definitely/absent/sample.pdf"
        );
        assert!(doc.last_result().is_none());
    }

    #[test]
    fn test_page_count_placeholder() {
        let doc = Document::open("sample.pdf").unwrap();
        assert_eq!(doc.page_count().unwrap(), 1);
    }

    #[test]
    fn test_page_placeholder_geometry() {
        let doc = Document::open("sample.pdf").unwrap();
        let page = doc.page(3).unwrap();
        assert_eq!(page.page_number, 3);
        assert_eq!(page.width, US_LETTER_WIDTH);
        assert_eq!(page.height, US_LETTER_HEIGHT);
        assert!(page.cells.is_empty());
    }

    #[test]
    fn test_page_rejects_non_positive_numbers() {
        let doc = Document::open("sample.pdf").unwrap();
        assert!(matches!(doc.page(0).unwrap_err(), Error::InvalidPage(0)));
        assert!(matches!(doc.page(-4).unwrap_err(), Error::InvalidPage(-4)));
    }

    #[test]
    fn test_export_missing_resources_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sample.pdf");
        std::fs::write(&input, b"%PDF-1.4\n%%EOF\n").unwrap();

        let mut doc = Document::open(input.to_str().unwrap()).unwrap();
        doc.set_resources_dir(dir.path().join("no-such-dir"));

        let err = doc.export_json().unwrap_err();
        assert!(matches!(err, Error::ParseFailed(_)), "got {err:?}");
        assert!(doc.last_result().is_none());
    }

    #[test]
    fn test_export_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let resources = dir.path().join("resources");
        std::fs::create_dir(&resources).unwrap();
        let input = dir.path().join("sample.pdf");
        std::fs::write(&input, b"%PDF-1.7\n%%EOF\n").unwrap();

        let mut doc = Document::open(input.to_str().unwrap()).unwrap();
        doc.set_resources_dir(&resources);

        let exported = doc.export_json().unwrap();

        // The returned string carries the same structured content as the
        // file written beside the input.
        let sidecar = dir.path().join("sample.pdf.json");
        let on_disk: Value =
            serde_json::from_str(&std::fs::read_to_string(&sidecar).unwrap()).unwrap();
        let returned: Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(returned, on_disk);

        // And it is stored on the document.
        assert_eq!(doc.last_result(), Some(&on_disk));
        assert_eq!(on_disk["info"]["num_pages"], 1);
    }

    #[test]
    fn test_export_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let resources = dir.path().join("resources");
        std::fs::create_dir(&resources).unwrap();

        let missing = dir.path().join("absent.pdf");
        let mut doc = Document::open(missing.to_str().unwrap()).unwrap();
        doc.set_resources_dir(&resources);

        let err = doc.export_json().unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)), "got {err:?}");
    }
}
