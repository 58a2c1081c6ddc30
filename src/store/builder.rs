// Store builder - turns the raw cty dataset into a populated store file
//
// Builds into a temporary path and renames into place once complete, so
// an existing store stays readable for the whole rebuild and a reader
// never opens a partially written file.

use std::path::Path;

use sqlx::sqlite::SqlitePoolOptions;

use crate::error::{CtyError, Result};
use crate::index::EntityIndex;
use crate::record::DxccRecord;
use crate::store::{StoreMeta, META_KEY};

/// Build a complete store at `db_path` from the raw prefix dataset.
///
/// Returns the derived entity index and the maximum prefix length. Any
/// malformed dataset entry aborts the build and leaves an existing store
/// untouched.
pub async fn build_store(
    db_path: &Path,
    raw: &plist::Dictionary,
) -> Result<(EntityIndex, usize)> {
    let max_len = raw
        .iter()
        .map(|(key, _)| {
            let key: &str = key.as_ref();
            key.len()
        })
        .max()
        .ok_or_else(|| CtyError::Fetch("empty prefix dataset".to_string()))?;

    let tmp = db_path.with_extension("db.new");
    if tokio::fs::try_exists(&tmp).await? {
        tokio::fs::remove_file(&tmp).await?;
    }

    log::info!("Creating cty store {}", db_path.display());

    let url = format!("sqlite:{}?mode=rwc", tmp.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await?;
    sqlx::query("CREATE TABLE cty_prefixes (key TEXT PRIMARY KEY, value BLOB NOT NULL)")
        .execute(&pool)
        .await?;

    let mut index = EntityIndex::new();
    for (prefix, entry) in raw.iter() {
        let prefix: &str = prefix.as_ref();
        let dict = entry.as_dictionary().ok_or_else(|| CtyError::MalformedRecord {
            prefix: prefix.to_string(),
            field: "attributes",
        })?;
        let record = DxccRecord::from_plist(prefix, dict)?;
        sqlx::query("INSERT INTO cty_prefixes (key, value) VALUES (?, ?)")
            .bind(prefix)
            .bind(record.encode()?)
            .execute(&pool)
            .await?;
        index.add(&record.country, prefix);
    }

    // The metadata row goes in last: a reader that finds it can rely on
    // every prefix it references already being present.
    let meta = StoreMeta {
        entities: index.clone(),
        max_len,
    };
    sqlx::query("INSERT INTO cty_prefixes (key, value) VALUES (?, ?)")
        .bind(META_KEY)
        .bind(serde_json::to_vec(&meta)?)
        .execute(&pool)
        .await?;
    pool.close().await;

    tokio::fs::rename(&tmp, db_path).await?;

    log::info!(
        "Created cty store {} ({} prefixes, {} entities)",
        db_path.display(),
        raw.len(),
        index.len()
    );
    Ok((index, max_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use crate::testutil::{entry, sample_dataset};
    use plist::Value;

    #[tokio::test]
    async fn test_build_populates_index_and_max_len() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cty.db");

        let (index, max_len) = build_store(&db_path, &sample_dataset()).await.unwrap();
        assert_eq!(max_len, 3);
        assert!(index.is_entity("United States"));
        assert!(index.is_entity("Hawaii"));
        let us = index.prefixes_of("United States").unwrap();
        assert!(us.contains("K"));
        assert!(us.contains("W"));

        // Every indexed prefix has a row in the store.
        let store = Store::open_read(&db_path).await.unwrap();
        for country in ["United States", "Hawaii", "Japan", "Guantanamo Bay"] {
            for prefix in index.prefixes_of(country).unwrap() {
                assert!(store.get(prefix).await.unwrap().is_some(), "{prefix} missing");
            }
        }
    }

    #[tokio::test]
    async fn test_rebuild_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cty.db");

        let first = build_store(&db_path, &sample_dataset()).await.unwrap();
        let second = build_store(&db_path, &sample_dataset()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_entry_aborts_build() {
        let mut raw = sample_dataset();
        let mut bad = entry("Nowhere", "X9", 999, 1, 1, "NA", 0.0, 0.0, 0, false);
        bad.remove("Country");
        raw.insert("X9".to_string(), Value::Dictionary(bad));

        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cty.db");
        let err = build_store(&db_path, &raw).await.unwrap_err();
        assert!(matches!(err, CtyError::MalformedRecord { .. }));
        // The failed build never replaces the target path.
        assert!(!db_path.exists());
    }

    #[tokio::test]
    async fn test_empty_dataset_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cty.db");
        let err = build_store(&db_path, &plist::Dictionary::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CtyError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_metadata_row_present_and_reserved() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cty.db");
        let (index, max_len) = build_store(&db_path, &sample_dataset()).await.unwrap();

        let store = Store::open_read(&db_path).await.unwrap();
        let meta = store.read_meta().await.unwrap();
        assert_eq!(meta.entities, index);
        assert_eq!(meta.max_len, max_len);
        // The reserved key never collides with an indexed prefix.
        for country in meta.entities.entities().collect::<Vec<_>>() {
            assert!(!meta.entities.prefixes_of(country).unwrap().contains(META_KEY));
        }
    }
}
