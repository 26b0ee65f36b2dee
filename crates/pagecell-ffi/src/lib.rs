// FFI boundary requires C-layout types and raw pointer handling. These are
// safe because:
// - handles are registry ids, never dereferenced as pointers
// - every page crosses the boundary as a single owning allocation
// - C strings are produced from validated UTF-8
#![allow(
    clippy::cast_possible_truncation, // page counts fit in i32 for FFI
    clippy::cast_possible_wrap,       // counts are small non-negative values
    clippy::must_use_candidate,       // FFI functions don't need must_use
    clippy::uninlined_format_args,    // format strings in error messages
)]

//! `pagecell` FFI bridge
//!
//! C FFI surface over the pagecell parser layer. A foreign caller opens a
//! document, optionally queries the page count and per-page cells, requests a
//! full JSON export, and closes the document.
//!
//! # Architecture
//!
//! - **Document handles**: ids into an internal registry, never raw pointers.
//!   A stale or double-closed handle fails the call instead of touching freed
//!   memory.
//! - **Pages and cells**: `repr(C)` views backed by one owning allocation per
//!   page; releasing the page releases every contained string.
//! - **Error channel**: a status code per call plus a thread-local last-error
//!   message, overwritten by every failing call.
//!
//! # Memory Management
//!
//! Every page returned by `pagecell_get_page` must be released exactly once
//! with `pagecell_free_page`, and every string returned by
//! `pagecell_export_json` with `pagecell_free_string`. Both release functions
//! accept null.
//!
//! # Thread Safety
//!
//! The handle registry is internally synchronized. The last-error slot is
//! thread-local: callers read the message on the thread that observed the
//! failure. Export carries its configuration per call, so concurrent exports
//! do not race on shared parser state.

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;

#[cfg(feature = "parser")]
mod page;
#[cfg(feature = "parser")]
mod registry;
#[cfg(not(feature = "parser"))]
mod stub;

#[cfg(feature = "parser")]
use pagecell_parse::{Document, Error};
#[cfg(feature = "parser")]
use std::ffi::CStr;

/// Result code for FFI operations
///
/// Numbering is fixed for ABI compatibility with existing callers. Null or
/// otherwise invalid arguments report `InvalidPdf`; the message from
/// [`pagecell_last_error`] distinguishes the cases.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagecellStatus {
    /// Operation succeeded
    Ok = 0,
    /// Input file does not exist
    FileNotFound = 1,
    /// Invalid argument or invalid document
    InvalidPdf = 2,
    /// Parse or export failure
    ParseFailed = 3,
    /// Allocation failure (declared for ABI stability)
    OutOfMemory = 4,
    /// Page number out of range
    InvalidPage = 5,
}

impl std::fmt::Display for PagecellStatus {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ok => "ok",
            Self::FileNotFound => "file not found",
            Self::InvalidPdf => "invalid pdf",
            Self::ParseFailed => "parse failed",
            Self::OutOfMemory => "out of memory",
            Self::InvalidPage => "invalid page",
        };
        write!(f, "{s}")
    }
}

#[cfg(feature = "parser")]
impl PagecellStatus {
    fn from_error(e: &Error) -> Self {
        match e {
            Error::FileNotFound(_) => Self::FileNotFound,
            Error::InvalidPdf(_) => Self::InvalidPdf,
            Error::InvalidPage(_) => Self::InvalidPage,
            // Argument misuse keeps the original InvalidPdf convention.
            Error::InvalidParameter(_) | Error::InvalidUtf8(_) | Error::NulByteInString(_) => {
                Self::InvalidPdf
            }
            Error::ParseFailed(_) | Error::Io(_) | Error::Json(_) => Self::ParseFailed,
        }
    }
}

/// Handle to an open document.
///
/// An id into the bridge's registry; 0 is never a valid id. Valid from a
/// successful `pagecell_open` until `pagecell_close`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PagecellHandle(pub u64);

/// A positioned text run with font metadata (C-compatible)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct PagecellTextCell {
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
    /// UTF-8 text, owned by the containing page
    pub text: *const c_char,
    /// Font name, owned by the containing page
    pub font_name: *const c_char,
}

/// Page descriptor (C-compatible)
///
/// Returned by `pagecell_get_page`; released, together with every contained
/// string, by a single `pagecell_free_page` call.
#[repr(C)]
#[derive(Debug)]
pub struct PagecellPage {
    /// Page number (1-indexed)
    pub page_number: i32,
    /// Page width in points
    pub width: f64,
    /// Page height in points
    pub height: f64,
    /// Cell array, or null when the page has no cells
    pub cells: *const PagecellTextCell,
    /// Number of cells
    pub cell_count: usize,
}

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

pub(crate) fn set_last_error(msg: &str) {
    let c = CString::new(msg).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = c);
}

#[cfg(feature = "parser")]
fn fail(e: &Error) -> PagecellStatus {
    log::error!("{e}");
    set_last_error(&e.to_string());
    PagecellStatus::from_error(e)
}

/// Get the most recent error message for this thread
///
/// # Returns
/// Null-terminated message (empty until the first failure). The pointer is
/// valid until the next failing call on the same thread; do not free it.
/// Stale messages persist after later successes and are not a failure
/// indicator on their own.
#[no_mangle]
pub extern "C" fn pagecell_last_error() -> *const c_char {
    LAST_ERROR.with(|slot| slot.borrow().as_ptr())
}

/// Get library version string
///
/// # Returns
/// Static version string (do not free)
#[no_mangle]
pub extern "C" fn pagecell_version() -> *const c_char {
    const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr().cast::<c_char>()
}

/// Check whether the parser layer is compiled in
///
/// # Returns
/// `false` in the stub build, where every data-producing call fails.
#[no_mangle]
pub const extern "C" fn pagecell_has_parser() -> bool {
    cfg!(feature = "parser")
}

// ============================================================================
// Document Lifecycle
// ============================================================================

/// Open a PDF document
///
/// Performs no filesystem access; a nonexistent path only surfaces at export
/// time.
///
/// # Arguments
/// - `path`: UTF-8 encoded file path (null-terminated)
/// - `out_handle`: receives the handle on success, untouched on failure
///
/// # Returns
/// Result code. The handle must eventually be released with `pagecell_close`.
///
/// # Safety
/// - `path` must be null or a valid null-terminated string
/// - `out_handle` must be null or a valid writable pointer
#[cfg(feature = "parser")]
#[no_mangle]
pub unsafe extern "C" fn pagecell_open(
    path: *const c_char,
    out_handle: *mut PagecellHandle,
) -> PagecellStatus {
    if path.is_null() || out_handle.is_null() {
        set_last_error("invalid arguments: null path or output pointer");
        return PagecellStatus::InvalidPdf;
    }

    let Ok(path_str) = CStr::from_ptr(path).to_str() else {
        set_last_error("invalid arguments: path is not valid UTF-8");
        return PagecellStatus::InvalidPdf;
    };

    match Document::open(path_str) {
        Ok(doc) => {
            let id = registry::insert(doc);
            *out_handle = PagecellHandle(id);
            log::debug!("opened {path_str} as handle {id}");
            PagecellStatus::Ok
        }
        Err(e) => fail(&e),
    }
}

/// Close a document and release its registry entry
///
/// The handle is invalid afterwards; closing it again (or using it in any
/// other call) fails with `InvalidPdf`.
#[cfg(feature = "parser")]
#[no_mangle]
pub extern "C" fn pagecell_close(handle: PagecellHandle) -> PagecellStatus {
    if registry::remove(handle.0) {
        PagecellStatus::Ok
    } else {
        set_last_error(&format!("unknown document handle: {}", handle.0));
        PagecellStatus::InvalidPdf
    }
}

/// Override the resources directory used by this document's exports
///
/// # Safety
/// - `path` must be null or a valid null-terminated UTF-8 string
#[cfg(feature = "parser")]
#[no_mangle]
pub unsafe extern "C" fn pagecell_set_resources_dir(
    handle: PagecellHandle,
    path: *const c_char,
) -> PagecellStatus {
    if path.is_null() {
        set_last_error("invalid arguments: null resources path");
        return PagecellStatus::InvalidPdf;
    }
    let Ok(path_str) = CStr::from_ptr(path).to_str() else {
        set_last_error("invalid arguments: resources path is not valid UTF-8");
        return PagecellStatus::InvalidPdf;
    };

    match registry::with_document_mut(handle.0, |doc| doc.set_resources_dir(path_str)) {
        Some(()) => PagecellStatus::Ok,
        None => unknown_handle(handle),
    }
}

// ============================================================================
// Page Access
// ============================================================================

/// Get the number of pages in the document
///
/// # Arguments
/// - `out_count`: receives the count on success, untouched on failure
///
/// # Safety
/// - `out_count` must be null or a valid writable pointer
#[cfg(feature = "parser")]
#[no_mangle]
pub unsafe extern "C" fn pagecell_page_count(
    handle: PagecellHandle,
    out_count: *mut i32,
) -> PagecellStatus {
    if out_count.is_null() {
        set_last_error("invalid arguments: null output pointer");
        return PagecellStatus::InvalidPdf;
    }

    match registry::with_document(handle.0, |doc| doc.page_count()) {
        Some(Ok(count)) => {
            *out_count = count as i32;
            PagecellStatus::Ok
        }
        Some(Err(e)) => fail(&e),
        None => unknown_handle(handle),
    }
}

/// Retrieve a page descriptor with its text cells
///
/// # Arguments
/// - `page_num`: page number, 1-indexed
/// - `out_page`: receives an owned page on success, untouched on failure
///
/// # Returns
/// Result code. `InvalidPage` for `page_num < 1`. On success the caller owns
/// the page and must release it exactly once with `pagecell_free_page`.
///
/// # Safety
/// - `out_page` must be null or a valid writable pointer
#[cfg(feature = "parser")]
#[no_mangle]
pub unsafe extern "C" fn pagecell_get_page(
    handle: PagecellHandle,
    page_num: i32,
    out_page: *mut *mut PagecellPage,
) -> PagecellStatus {
    if out_page.is_null() {
        set_last_error("invalid arguments: null output pointer");
        return PagecellStatus::InvalidPdf;
    }

    match registry::with_document(handle.0, |doc| doc.page(page_num)) {
        Some(Ok(page)) => {
            *out_page = page::into_raw(page);
            PagecellStatus::Ok
        }
        Some(Err(e)) => fail(&e),
        None => unknown_handle(handle),
    }
}

/// Free a page returned by `pagecell_get_page`
///
/// Releases the page, its cell array, and every contained string in one step.
/// No-op on null. Must be called at most once per page.
///
/// # Safety
/// - `page` must be null or a pointer from `pagecell_get_page`
/// - `page` must not be used after this call
#[cfg(feature = "parser")]
#[no_mangle]
pub unsafe extern "C" fn pagecell_free_page(page: *mut PagecellPage) -> PagecellStatus {
    page::free_raw(page);
    PagecellStatus::Ok
}

// ============================================================================
// Export
// ============================================================================

/// Run the parser end-to-end and return the serialized JSON result
///
/// The engine writes `<path>.json` beside the input and the returned string
/// carries the same structured content as that file. The document keeps the
/// parsed result until the next export.
///
/// # Arguments
/// - `out_json`: receives an owned string on success, untouched on failure
///
/// # Returns
/// Result code. `ParseFailed` when the resources directory is missing,
/// `FileNotFound` when the input does not exist, `InvalidPdf` when it is not
/// a PDF. On success the caller owns the string and must release it with
/// `pagecell_free_string`.
///
/// # Safety
/// - `out_json` must be null or a valid writable pointer
#[cfg(feature = "parser")]
#[no_mangle]
pub unsafe extern "C" fn pagecell_export_json(
    handle: PagecellHandle,
    out_json: *mut *mut c_char,
) -> PagecellStatus {
    if out_json.is_null() {
        set_last_error("invalid arguments: null output pointer");
        return PagecellStatus::InvalidPdf;
    }

    match registry::with_document_mut(handle.0, pagecell_parse::Document::export_json) {
        Some(Ok(json)) => match CString::new(json) {
            Ok(s) => {
                *out_json = s.into_raw();
                PagecellStatus::Ok
            }
            Err(e) => fail(&Error::from(e)),
        },
        Some(Err(e)) => fail(&e),
        None => unknown_handle(handle),
    }
}

/// Free a string returned by `pagecell_export_json`
///
/// No-op on null.
///
/// # Safety
/// - `s` must be null or a pointer from `pagecell_export_json`
/// - `s` must not be used after this call
#[cfg(feature = "parser")]
#[no_mangle]
pub unsafe extern "C" fn pagecell_free_string(s: *mut c_char) -> PagecellStatus {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
    PagecellStatus::Ok
}

#[cfg(feature = "parser")]
fn unknown_handle(handle: PagecellHandle) -> PagecellStatus {
    set_last_error(&format!("unknown document handle: {}", handle.0));
    PagecellStatus::InvalidPdf
}
