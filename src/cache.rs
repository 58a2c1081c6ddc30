// Memoizing lookup cache - bounded LRU over resolved callsigns
//
// Keys are normalized (uppercased) callsigns. A `None` value memoizes a
// not-found outcome so repeated misses also skip the store. Store errors
// are never cached.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use serde::Serialize;

use crate::record::DxccRecord;

/// Cache counters for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub capacity: usize,
}

pub struct LookupCache {
    inner: Mutex<Inner>,
}

struct Inner {
    entries: LruCache<String, Option<DxccRecord>>,
    hits: u64,
    misses: u64,
}

impl LookupCache {
    pub fn new(capacity: usize) -> Self {
        LookupCache {
            inner: Mutex::new(Inner {
                entries: LruCache::new(NonZeroUsize::new(capacity.max(1)).unwrap()),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Outer `None` is a cache miss; `Some(None)` is a memoized not-found.
    pub fn get(&self, call: &str) -> Option<Option<DxccRecord>> {
        let mut inner = self.inner.lock().unwrap();
        let entry = inner.entries.get(call).cloned();
        match entry {
            Some(outcome) => {
                inner.hits += 1;
                Some(outcome)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    pub fn put(&self, call: String, outcome: Option<DxccRecord>) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.put(call, outcome);
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().unwrap();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            size: inner.entries.len(),
            capacity: inner.entries.cap().get(),
        }
    }
}
