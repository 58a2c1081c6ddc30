// Error taxonomy for the cty lookup engine
//
// Only Fetch and MalformedRecord may abort initialization; NotFound is the
// normal "no such entity" outcome and never tears down the engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CtyError {
    /// Network/transport/parse failure retrieving the cty dataset.
    /// Fatal to a rebuild; there is no retry built in.
    #[error("failed to fetch cty data: {0}")]
    Fetch(String),

    /// SQLite failure on the prefix store. At open time this is recovered
    /// by triggering a rebuild; during lookups it is surfaced.
    #[error("cty store error: {0}")]
    Store(#[from] sqlx::Error),

    /// A dataset entry is missing a required attribute, or carries one of
    /// the wrong type. Aborts the build.
    #[error("prefix {prefix}: missing or invalid field '{field}'")]
    MalformedRecord { prefix: String, field: &'static str },

    /// No registered prefix matches the callsign, or the country is not a
    /// known entity.
    #[error("{0} not found")]
    NotFound(String),

    /// Filesystem failure around the store or staging files.
    #[error("cty i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record or metadata entry failed to encode/decode.
    #[error("cty record codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CtyError>;
