// Callsign resolver - longest-prefix match over the persistent store
//
// Construction decides between the fast path (open an existing, fresh
// store and load its metadata) and the slow path (fetch the dataset,
// rebuild the store, derive the metadata). After that every lookup goes
// through the LRU memo cache and falls back to per-prefix store probes.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{CacheStats, LookupCache};
use crate::error::{CtyError, Result};
use crate::fetch;
use crate::index::EntityIndex;
use crate::record::DxccRecord;
use crate::store::{builder, Store, StoreMeta, CTY_DB};

/// Staging file name for the downloaded dataset.
pub const CTY_FILE: &str = "cty.plist";

const DEFAULT_CACHE_SIZE: usize = 8192;
const DEFAULT_EXPIRY: Duration = Duration::from_secs(86_400 * 7);

/// Resolver configuration. The defaults match unattended use: a shared
/// temp directory, a week-long store lifetime, and a few thousand cached
/// lookups.
#[derive(Debug, Clone)]
pub struct CtyConfig {
    /// Directory holding the store file and the download staging file.
    pub store_dir: PathBuf,
    /// Memo cache capacity in entries.
    pub cache_size: usize,
    /// Store freshness window; an older store is rebuilt on construction.
    pub expiry: Duration,
    /// Where to fetch the raw dataset from.
    pub cty_url: String,
}

impl Default for CtyConfig {
    fn default() -> Self {
        CtyConfig {
            store_dir: std::env::temp_dir(),
            cache_size: DEFAULT_CACHE_SIZE,
            expiry: DEFAULT_EXPIRY,
            cty_url: fetch::CTY_URL.to_string(),
        }
    }
}

/// The lookup engine. One instance owns one read handle on the store and
/// the in-process caches; construct it once and share it.
pub struct CtyResolver {
    store: Store,
    index: EntityIndex,
    max_len: usize,
    cache: LookupCache,
}

impl CtyResolver {
    /// Open a fresh store, or fetch the dataset and rebuild one.
    ///
    /// Fails only when a rebuild is needed and cannot complete: the fetch
    /// fails, a dataset entry is malformed, or the store cannot be
    /// written. A missing, stale or corrupt store file on its own never
    /// fails construction.
    pub async fn new(config: CtyConfig) -> Result<Self> {
        tokio::fs::create_dir_all(&config.store_dir).await?;
        let db_path = config.store_dir.join(CTY_DB);

        if let Some((store, meta)) = Store::open_fresh(&db_path, config.expiry).await? {
            return Ok(Self::assemble(store, meta, config.cache_size));
        }

        let staging = config.store_dir.join(CTY_FILE);
        fetch::download_cty(&config.cty_url, &staging).await?;
        let raw = fetch::load_cty(&staging)?;

        let (entities, max_len) = builder::build_store(&db_path, &raw).await?;
        let store = Store::open_read(&db_path).await?;
        Ok(Self::assemble(
            store,
            StoreMeta { entities, max_len },
            config.cache_size,
        ))
    }

    fn assemble(store: Store, meta: StoreMeta, cache_size: usize) -> Self {
        CtyResolver {
            store,
            index: meta.entities,
            max_len: meta.max_len,
            cache: LookupCache::new(cache_size),
        }
    }

    /// Resolve a callsign to its DXCC record, memoized.
    ///
    /// Both resolved records and not-found outcomes are cached per
    /// normalized callsign; store errors are returned but never cached.
    pub async fn lookup(&self, call: &str) -> Result<DxccRecord> {
        let call = call.to_uppercase();
        if let Some(outcome) = self.cache.get(&call) {
            return outcome.ok_or(CtyError::NotFound(call));
        }
        match self.resolve(&call).await {
            Ok(record) => {
                self.cache.put(call, Some(record.clone()));
                Ok(record)
            }
            Err(CtyError::NotFound(_)) => {
                self.cache.put(call.clone(), None);
                Err(CtyError::NotFound(call))
            }
            Err(e) => Err(e),
        }
    }

    /// Longest-prefix match against the store.
    ///
    /// Probes `call[..k]` for `k = min(max_len, len)` down to 1; prefix
    /// tables are not prefix-free ("K" and "KH6" both exist), so the most
    /// specific registration must win and the first hit is the result.
    /// Expects `call` already uppercased.
    async fn resolve(&self, call: &str) -> Result<DxccRecord> {
        let limit = self.max_len.min(call.len());
        for k in (1..=limit).rev() {
            let Some(prefix) = call.get(..k) else {
                continue;
            };
            if let Some(bytes) = self.store.get(prefix).await? {
                return DxccRecord::decode(&bytes);
            }
        }
        Err(CtyError::NotFound(call.to_string()))
    }

    /// True iff `country` is a known entity name.
    pub fn is_entity(&self, country: &str) -> bool {
        self.index.is_entity(country)
    }

    /// All prefixes registered to `country`.
    pub fn prefixes_of(&self, country: &str) -> Result<&BTreeSet<String>> {
        self.index.prefixes_of(country)
    }

    /// Known entity names, sorted.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.index.entities()
    }

    /// Memo cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Longest prefix length in the store.
    pub fn max_prefix_len(&self) -> usize {
        self.max_len
    }
}
