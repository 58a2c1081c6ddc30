// cty.plist retrieval
//
// Downloads the country-files.com prefix dataset to a staging file and
// parses it into the raw prefix -> attributes mapping the store builder
// consumes. The staging file is replaced atomically (write to a .tmp
// path, remove the old copy, rename into place) so a reader never sees a
// half-written file.

use std::path::Path;
use std::time::Duration;

use crate::error::{CtyError, Result};

/// Upstream prefix dataset, refreshed by its maintainers a few times a month.
pub const CTY_URL: &str = "https://www.country-files.com/cty/cty.plist";

const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

/// Download the dataset from `url` into `staging` (atomic replace).
///
/// Any transport or HTTP failure is fatal to the rebuild that requested it.
pub async fn download_cty(url: &str, staging: &Path) -> Result<()> {
    log::info!("Downloading {} to {}", url, staging.display());

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| CtyError::Fetch(format!("failed to create HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CtyError::Fetch(format!("request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(CtyError::Fetch(format!(
            "download failed with status {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| CtyError::Fetch(format!("failed to read response body: {e}")))?;

    log::info!("Downloaded {} bytes", bytes.len());

    replace_staging(staging, &bytes).await
}

/// Land `bytes` at `staging` without ever exposing a half-written file:
/// write a .tmp sibling, remove the previous copy, rename into place.
async fn replace_staging(staging: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = staging.with_extension("plist.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    if tokio::fs::try_exists(staging).await? {
        tokio::fs::remove_file(staging).await?;
    }
    tokio::fs::rename(&tmp, staging).await?;
    Ok(())
}

/// Parse a downloaded cty.plist into the raw prefix -> attributes mapping.
///
/// A file the plist parser rejects, or whose top level is not a
/// dictionary, counts as a failed fetch: the transport delivered
/// something that is not the dataset.
pub fn load_cty(path: &Path) -> Result<plist::Dictionary> {
    let root = plist::Value::from_file(path)
        .map_err(|e| CtyError::Fetch(format!("{}: {e}", path.display())))?;
    root.into_dictionary()
        .ok_or_else(|| CtyError::Fetch(format!("{}: not a prefix dictionary", path.display())))
}
