// Persistent prefix store - SQLite-backed string-keyed byte store
//
// One row per known prefix (value = serialized DxccRecord) plus a single
// reserved metadata row holding the entity index and the maximum prefix
// length. The file's mtime plus a fixed expiry window decides freshness;
// anything missing, stale or corrupt is treated as absent and rebuilt.

pub mod builder;

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};

use crate::error::{CtyError, Result};
use crate::index::EntityIndex;

/// Store file name inside the configured directory.
pub const CTY_DB: &str = "cty.db";

/// Reserved metadata key; never a valid callsign prefix.
pub const META_KEY: &str = "_meta_data_";

/// The metadata row: everything a reader needs besides the prefix rows
/// themselves. Written last during a build so it never references rows
/// that are not there yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreMeta {
    pub entities: EntityIndex,
    pub max_len: usize,
}

/// Read-only handle on an opened store file.
pub struct Store {
    pool: Pool<Sqlite>,
    path: PathBuf,
}

impl Store {
    /// Open the store read-only. Fails if the file is missing or is not a
    /// usable SQLite database.
    pub async fn open_read(path: &Path) -> Result<Self> {
        let url = format!("sqlite:{}?mode=ro", path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await?;
        Ok(Store {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Fast path: open an existing, fresh store and load its metadata.
    ///
    /// Returns `Ok(None)` when the file is absent, older than the expiry
    /// window, unopenable, or its metadata row is missing or undecodable.
    /// All of those recover by rebuilding; none are surfaced to callers.
    pub async fn open_fresh(path: &Path, expiry: Duration) -> Result<Option<(Store, StoreMeta)>> {
        let mtime = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(mtime) => mtime,
            Err(e) => {
                log::info!("cty store {} not usable: {}", path.display(), e);
                return Ok(None);
            }
        };

        let age = SystemTime::now().duration_since(mtime).unwrap_or_default();
        if age >= expiry {
            log::info!(
                "cty store {} is stale (modified {}), rebuilding",
                path.display(),
                chrono::DateTime::<chrono::Utc>::from(mtime).format("%Y-%m-%d %H:%M:%S UTC")
            );
            return Ok(None);
        }

        let store = match Store::open_read(path).await {
            Ok(store) => store,
            Err(e) => {
                log::warn!("Failed to open cty store {}: {}", path.display(), e);
                return Ok(None);
            }
        };
        match store.read_meta().await {
            Ok(meta) => {
                log::info!(
                    "Using cty store {} ({} entities, max prefix length {})",
                    path.display(),
                    meta.entities.len(),
                    meta.max_len
                );
                Ok(Some((store, meta)))
            }
            Err(e) => {
                log::warn!("cty store {} has no usable metadata: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    /// Raw bytes stored under `key`, if any.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let row = sqlx::query("SELECT value FROM cty_prefixes WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    /// Decode the reserved metadata row. A store without one is mid-build
    /// or truncated, which reads as "not ready" rather than "empty".
    pub async fn read_meta(&self) -> Result<StoreMeta> {
        let bytes = self
            .get(META_KEY)
            .await?
            .ok_or(CtyError::Store(sqlx::Error::RowNotFound))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
