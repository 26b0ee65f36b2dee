//! Handle registry for open documents
//!
//! Handles handed across the FFI boundary are ids into this map rather than
//! raw pointers. A stale or double-closed handle simply misses the map and
//! the call fails, instead of touching freed memory.

use once_cell::sync::Lazy;
use pagecell_parse::Document;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

// Ids start at 1; 0 stays reserved as the never-valid handle.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

static DOCUMENTS: Lazy<Mutex<HashMap<u64, Document>>> = Lazy::new(|| Mutex::new(HashMap::new()));

fn documents() -> MutexGuard<'static, HashMap<u64, Document>> {
    DOCUMENTS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Register a document and return its fresh id.
pub fn insert(doc: Document) -> u64 {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    documents().insert(id, doc);
    id
}

/// Remove a document; false when the id is unknown.
pub fn remove(id: u64) -> bool {
    documents().remove(&id).is_some()
}

/// Run `f` against the document behind `id`, if it is still registered.
pub fn with_document<R>(id: u64, f: impl FnOnce(&Document) -> R) -> Option<R> {
    documents().get(&id).map(f)
}

/// Mutable variant of [`with_document`].
pub fn with_document_mut<R>(id: u64, f: impl FnOnce(&mut Document) -> R) -> Option<R> {
    documents().get_mut(&id).map(f)
}
