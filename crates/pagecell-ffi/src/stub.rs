//! Stub variant of the bridge
//!
//! Compiled when the `parser` feature is disabled. Keeps the full symbol set
//! linkable on platforms where the parser layer is not built: every
//! data-producing call fails with a fixed message, release calls succeed as
//! no-ops, and output pointers are never written.

use crate::{set_last_error, PagecellHandle, PagecellPage, PagecellStatus};
use std::ffi::CString;
use std::os::raw::c_char;

const STUB_MESSAGE: &str =
    "pagecell parser is not available on this platform; rebuild with the `parser` feature";

fn stub_failure() -> PagecellStatus {
    set_last_error(STUB_MESSAGE);
    PagecellStatus::ParseFailed
}

/// Stub: always fails; see the `parser` feature.
///
/// # Safety
/// Pointer arguments are never dereferenced.
#[no_mangle]
pub unsafe extern "C" fn pagecell_open(
    _path: *const c_char,
    _out_handle: *mut PagecellHandle,
) -> PagecellStatus {
    stub_failure()
}

/// Stub: succeeds as a no-op.
#[no_mangle]
pub extern "C" fn pagecell_close(_handle: PagecellHandle) -> PagecellStatus {
    PagecellStatus::Ok
}

/// Stub: always fails; see the `parser` feature.
///
/// # Safety
/// Pointer arguments are never dereferenced.
#[no_mangle]
pub unsafe extern "C" fn pagecell_set_resources_dir(
    _handle: PagecellHandle,
    _path: *const c_char,
) -> PagecellStatus {
    stub_failure()
}

/// Stub: always fails; see the `parser` feature.
///
/// # Safety
/// Pointer arguments are never dereferenced.
#[no_mangle]
pub unsafe extern "C" fn pagecell_page_count(
    _handle: PagecellHandle,
    _out_count: *mut i32,
) -> PagecellStatus {
    stub_failure()
}

/// Stub: always fails; see the `parser` feature.
///
/// # Safety
/// Pointer arguments are never dereferenced.
#[no_mangle]
pub unsafe extern "C" fn pagecell_get_page(
    _handle: PagecellHandle,
    _page_num: i32,
    _out_page: *mut *mut PagecellPage,
) -> PagecellStatus {
    stub_failure()
}

/// Stub: succeeds as a no-op (the stub never hands out pages).
///
/// # Safety
/// The pointer is never dereferenced.
#[no_mangle]
pub unsafe extern "C" fn pagecell_free_page(_page: *mut PagecellPage) -> PagecellStatus {
    PagecellStatus::Ok
}

/// Stub: always fails; see the `parser` feature.
///
/// # Safety
/// Pointer arguments are never dereferenced.
#[no_mangle]
pub unsafe extern "C" fn pagecell_export_json(
    _handle: PagecellHandle,
    _out_json: *mut *mut c_char,
) -> PagecellStatus {
    stub_failure()
}

/// Stub: frees a string if one was somehow produced; no-op on null.
///
/// # Safety
/// - `s` must be null or a pointer from a pagecell function
#[no_mangle]
pub unsafe extern "C" fn pagecell_free_string(s: *mut c_char) -> PagecellStatus {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
    PagecellStatus::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::ptr;

    #[test]
    fn test_stub_operations_fail_with_fixed_message() {
        unsafe {
            let mut handle = PagecellHandle::default();
            let path = CString::new("sample.pdf").unwrap();
            assert_eq!(
                pagecell_open(path.as_ptr(), &mut handle),
                PagecellStatus::ParseFailed
            );
            assert_eq!(handle, PagecellHandle::default());

            let msg = CStr::from_ptr(crate::pagecell_last_error())
                .to_str()
                .unwrap();
            assert_eq!(msg, STUB_MESSAGE);

            let mut count = 0;
            assert_eq!(
                pagecell_page_count(handle, &mut count),
                PagecellStatus::ParseFailed
            );
            assert_eq!(count, 0);
        }
    }

    #[test]
    fn test_stub_release_operations_succeed() {
        unsafe {
            assert_eq!(pagecell_close(PagecellHandle(42)), PagecellStatus::Ok);
            assert_eq!(pagecell_free_page(ptr::null_mut()), PagecellStatus::Ok);
            assert_eq!(pagecell_free_string(ptr::null_mut()), PagecellStatus::Ok);
        }
    }

    #[test]
    fn test_stub_reports_parser_unavailable() {
        assert!(!crate::pagecell_has_parser());
    }
}
