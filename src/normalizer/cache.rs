//! Content-addressed memoization of normalized batches.
//!
//! Entries are keyed by a SHA-256 fingerprint of the raw input bytes, so
//! two sessions working on different files can never share an entry, and
//! re-supplying the same bytes hits the cache regardless of file name.
//! The map is process-wide with last-writer-wins semantics.

use super::records::NormalizedBatch;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

static LOAD_CACHE: Lazy<Mutex<HashMap<String, Arc<NormalizedBatch>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Fingerprint raw input bytes (SHA-256, hex-encoded)
///
/// **Public** - callers fingerprint once and reuse the key for fetch/store
pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Look up a previously normalized batch by fingerprint
pub fn fetch(fingerprint: &str) -> Option<Arc<NormalizedBatch>> {
    lock().get(fingerprint).cloned()
}

/// Store a normalized batch under its fingerprint, replacing any previous
/// entry for the same content
pub fn store(fingerprint: &str, batch: NormalizedBatch) -> Arc<NormalizedBatch> {
    let entry = Arc::new(batch);
    lock().insert(fingerprint.to_string(), Arc::clone(&entry));
    entry
}

/// Drop every cached batch (invoked when a new working set supersedes the
/// old one)
pub fn invalidate_all() {
    lock().clear();
}

fn lock() -> std::sync::MutexGuard<'static, HashMap<String, Arc<NormalizedBatch>>> {
    LOAD_CACHE.lock().unwrap_or_else(PoisonError::into_inner)
}
