// DXCC record - one resolved entity's attributes
//
// Records are built once during a store rebuild from the raw cty.plist
// entries and are immutable afterwards. Field lookup in the raw data is
// case-insensitive; a missing or mistyped field aborts the build.

use std::collections::HashMap;

use plist::Value;
use serde::{Deserialize, Serialize};

use crate::error::{CtyError, Result};

/// The attributes of one DXCC entity, keyed in the store by `prefix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DxccRecord {
    pub country: String,
    pub prefix: String,
    pub adif: u16,
    pub cqzone: u8,
    pub ituzone: u8,
    pub continent: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Whole hours; fractional offsets in the source data are truncated.
    pub gmtoffset: i32,
    /// When set, `prefix` is registered for one complete callsign rather
    /// than a family of them. Carried for callers; does not alter matching.
    pub exactcallsign: bool,
}

impl DxccRecord {
    /// Build a record from one cty.plist entry.
    ///
    /// `prefix` is the dataset key the entry was filed under and is only
    /// used for error reporting; the record's own `Prefix` field is
    /// authoritative.
    pub fn from_plist(prefix: &str, dict: &plist::Dictionary) -> Result<Self> {
        let attrs: HashMap<String, &Value> = dict
            .iter()
            .map(|(key, value)| {
                let key: &str = key.as_ref();
                (key.to_ascii_lowercase(), value)
            })
            .collect();

        Ok(DxccRecord {
            country: get_string(&attrs, prefix, "country")?,
            prefix: get_string(&attrs, prefix, "prefix")?,
            adif: get_u16(&attrs, prefix, "adif")?,
            cqzone: get_u8(&attrs, prefix, "cqzone")?,
            ituzone: get_u8(&attrs, prefix, "ituzone")?,
            continent: get_string(&attrs, prefix, "continent")?,
            latitude: get_float(&attrs, prefix, "latitude")?,
            longitude: get_float(&attrs, prefix, "longitude")?,
            gmtoffset: get_float(&attrs, prefix, "gmtoffset")?.trunc() as i32,
            exactcallsign: get_bool(&attrs, prefix, "exactcallsign")?,
        })
    }

    /// Serialize for storage under the prefix key.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize a stored record.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

fn malformed(prefix: &str, field: &'static str) -> CtyError {
    CtyError::MalformedRecord {
        prefix: prefix.to_string(),
        field,
    }
}

fn get_value<'a>(
    attrs: &HashMap<String, &'a Value>,
    prefix: &str,
    field: &'static str,
) -> Result<&'a Value> {
    attrs.get(field).copied().ok_or_else(|| malformed(prefix, field))
}

fn get_string(
    attrs: &HashMap<String, &Value>,
    prefix: &str,
    field: &'static str,
) -> Result<String> {
    get_value(attrs, prefix, field)?
        .as_string()
        .map(str::to_string)
        .ok_or_else(|| malformed(prefix, field))
}

fn get_int(attrs: &HashMap<String, &Value>, prefix: &str, field: &'static str) -> Result<i64> {
    get_value(attrs, prefix, field)?
        .as_signed_integer()
        .ok_or_else(|| malformed(prefix, field))
}

// Out-of-range values are as malformed as mistyped ones; zones and ADIF
// codes must survive the narrowing intact.
fn get_u16(attrs: &HashMap<String, &Value>, prefix: &str, field: &'static str) -> Result<u16> {
    u16::try_from(get_int(attrs, prefix, field)?).map_err(|_| malformed(prefix, field))
}

fn get_u8(attrs: &HashMap<String, &Value>, prefix: &str, field: &'static str) -> Result<u8> {
    u8::try_from(get_int(attrs, prefix, field)?).map_err(|_| malformed(prefix, field))
}

/// Accepts both Real and Integer plist values; cty.plist mixes them for
/// coordinates and GMT offsets.
fn get_float(attrs: &HashMap<String, &Value>, prefix: &str, field: &'static str) -> Result<f64> {
    let value = get_value(attrs, prefix, field)?;
    value
        .as_real()
        .or_else(|| value.as_signed_integer().map(|n| n as f64))
        .ok_or_else(|| malformed(prefix, field))
}

fn get_bool(attrs: &HashMap<String, &Value>, prefix: &str, field: &'static str) -> Result<bool> {
    get_value(attrs, prefix, field)?
        .as_boolean()
        .ok_or_else(|| malformed(prefix, field))
}
