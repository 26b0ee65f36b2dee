//! Types for parsed PDF content
//!
//! These types define the JSON envelope the engine writes beside the input
//! document and hands back to the bridge.

use serde::{Deserialize, Serialize};

/// US Letter page width in points (8.5 inches × 72 dpi)
pub const US_LETTER_WIDTH: f64 = 612.0;
/// US Letter page height in points (11 inches × 72 dpi)
pub const US_LETTER_HEIGHT: f64 = 792.0;

/// Top-level result written by the parse engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Document metadata
    pub info: DocumentInfo,

    /// Parsed pages
    pub pages: Vec<Page>,
}

/// Document information
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Source filename
    pub filename: String,

    /// Number of pages
    pub num_pages: usize,
}

/// A single parsed page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: i32,

    /// Page width in points
    pub width: f64,

    /// Page height in points
    pub height: f64,

    /// Positioned text runs on this page
    #[serde(default)]
    pub cells: Vec<TextCell>,
}

/// A positioned text run with font metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCell {
    /// Left edge X coordinate
    pub x: f64,
    /// Bottom edge Y coordinate (PDF coordinates, origin at bottom)
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Font size in points
    pub font_size: f64,
    /// UTF-8 text content
    pub text: String,
    /// Embedded font name
    pub font_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_json_roundtrip() {
        let page = Page {
            page_number: 1,
            width: US_LETTER_WIDTH,
            height: US_LETTER_HEIGHT,
            cells: vec![TextCell {
                x: 72.0,
                y: 700.0,
                width: 120.0,
                height: 14.0,
                font_size: 12.0,
                text: "Heading".to_string(),
                font_name: "/F1".to_string(),
            }],
        };

        let json = serde_json::to_string(&page).unwrap();
        let back: Page = serde_json::from_str(&json).unwrap();
        assert_eq!(back, page);
    }

    #[test]
    fn test_page_cells_default_to_empty() {
        let json = r#"{"page_number":1,"width":612.0,"height":792.0}"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert!(page.cells.is_empty());
    }
}
