//! Owned page storage behind the C-visible page layout
//!
//! The caller sees a [`PagecellPage`]; the bridge owns a [`PageStorage`]
//! around it. One allocation carries the page header, the cell array, and
//! every string, so one `pagecell_free_page` releases everything.

use crate::{PagecellPage, PagecellTextCell};
use pagecell_parse::Page;
use std::ffi::CString;
use std::ptr;

/// Backing storage for a page handed to the caller.
///
/// `page` must stay the first field: the caller receives a pointer to it and
/// [`free_raw`] recovers the storage from that same pointer, which `repr(C)`
/// guarantees shares the storage's address. Dropping the storage releases the
/// cell array and every string in one step.
#[repr(C)]
struct PageStorage {
    page: PagecellPage,
    cells: Box<[PagecellTextCell]>,
    strings: Box<[CString]>,
}

/// Move a parsed page into a caller-owned allocation.
pub fn into_raw(page: Page) -> *mut PagecellPage {
    let mut strings = Vec::with_capacity(page.cells.len() * 2);
    let mut cells = Vec::with_capacity(page.cells.len());

    for cell in page.cells {
        // CString's heap buffer is stable across moves, so the pointers taken
        // here survive the pushes below.
        let text = c_string(cell.text);
        let font_name = c_string(cell.font_name);
        cells.push(PagecellTextCell {
            x: cell.x,
            y: cell.y,
            width: cell.width,
            height: cell.height,
            font_size: cell.font_size,
            text: text.as_ptr(),
            font_name: font_name.as_ptr(),
        });
        strings.push(text);
        strings.push(font_name);
    }

    let mut storage = Box::new(PageStorage {
        page: PagecellPage {
            page_number: page.page_number,
            width: page.width,
            height: page.height,
            cells: ptr::null(),
            cell_count: cells.len(),
        },
        cells: cells.into_boxed_slice(),
        strings: strings.into_boxed_slice(),
    });
    if !storage.cells.is_empty() {
        storage.page.cells = storage.cells.as_ptr();
    }

    Box::into_raw(storage).cast::<PagecellPage>()
}

/// Release a page produced by [`into_raw`].
///
/// # Safety
/// - `page` must be null or a pointer previously returned by [`into_raw`]
/// - `page` must not be used after this call
pub unsafe fn free_raw(page: *mut PagecellPage) {
    if !page.is_null() {
        drop(Box::from_raw(page.cast::<PageStorage>()));
    }
}

/// Interior nul bytes cannot cross the C boundary; truncate at the first one.
fn c_string(s: String) -> CString {
    CString::new(s).unwrap_or_else(|e| {
        let nul = e.nul_position();
        let mut bytes = e.into_vec();
        bytes.truncate(nul);
        CString::new(bytes).unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecell_parse::TextCell;
    use std::ffi::CStr;

    fn sample_page() -> Page {
        Page {
            page_number: 1,
            width: 612.0,
            height: 792.0,
            cells: vec![
                TextCell {
                    x: 72.0,
                    y: 700.0,
                    width: 120.0,
                    height: 14.0,
                    font_size: 12.0,
                    text: "Heading".to_string(),
                    font_name: "/CHJOZT+CMBX12".to_string(),
                },
                TextCell {
                    x: 72.0,
                    y: 680.0,
                    width: 400.0,
                    height: 10.0,
                    font_size: 10.0,
                    text: "Body text".to_string(),
                    font_name: "/F38".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_into_raw_exposes_cells_and_strings() {
        unsafe {
            let raw = into_raw(sample_page());
            assert!(!raw.is_null());
            assert_eq!((*raw).cell_count, 2);

            let cells = std::slice::from_raw_parts((*raw).cells, (*raw).cell_count);
            assert_eq!(CStr::from_ptr(cells[0].text).to_str().unwrap(), "Heading");
            assert_eq!(
                CStr::from_ptr(cells[1].font_name).to_str().unwrap(),
                "/F38"
            );
            assert_eq!(cells[1].font_size, 10.0);

            free_raw(raw);
        }
    }

    #[test]
    fn test_empty_page_has_null_cell_array() {
        unsafe {
            let raw = into_raw(Page {
                page_number: 1,
                width: 612.0,
                height: 792.0,
                cells: Vec::new(),
            });
            assert!((*raw).cells.is_null());
            assert_eq!((*raw).cell_count, 0);
            free_raw(raw);
        }
    }

    #[test]
    fn test_interior_nul_is_truncated() {
        let mut page = sample_page();
        page.cells[0].text = "cut\0here".to_string();
        unsafe {
            let raw = into_raw(page);
            let cells = std::slice::from_raw_parts((*raw).cells, (*raw).cell_count);
            assert_eq!(CStr::from_ptr(cells[0].text).to_str().unwrap(), "cut");
            free_raw(raw);
        }
    }

    #[test]
    fn test_free_raw_accepts_null() {
        unsafe { free_raw(std::ptr::null_mut()) };
    }
}
