// ctydb - offline DXCC entity resolution from cty.plist
//
// Resolves amateur-radio callsigns to their controlling DXCC entity by
// longest-prefix match against a weekly-refreshed on-disk prefix store,
// with an in-process LRU cache in front of it.

pub mod cache;
pub mod error;
pub mod fetch;
pub mod index;
pub mod record;
pub mod resolver;
pub mod store;

#[cfg(test)]
mod testutil;

pub use cache::CacheStats;
pub use error::CtyError;
pub use index::EntityIndex;
pub use record::DxccRecord;
pub use resolver::{CtyConfig, CtyResolver};
