// Shared test fixtures: small synthetic cty datasets

use plist::{Dictionary, Value};

#[allow(clippy::too_many_arguments)]
pub fn entry(
    country: &str,
    prefix: &str,
    adif: u16,
    cqzone: u8,
    ituzone: u8,
    continent: &str,
    latitude: f64,
    longitude: f64,
    gmtoffset: i64,
    exactcallsign: bool,
) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.insert("Country".to_string(), Value::String(country.to_string()));
    dict.insert("Prefix".to_string(), Value::String(prefix.to_string()));
    dict.insert("ADIF".to_string(), Value::Integer((adif as i64).into()));
    dict.insert("CQZone".to_string(), Value::Integer((cqzone as i64).into()));
    dict.insert("ITUZone".to_string(), Value::Integer((ituzone as i64).into()));
    dict.insert("Continent".to_string(), Value::String(continent.to_string()));
    dict.insert("Latitude".to_string(), Value::Real(latitude));
    dict.insert("Longitude".to_string(), Value::Real(longitude));
    dict.insert("GMTOffset".to_string(), Value::Integer(gmtoffset.into()));
    dict.insert("ExactCallsign".to_string(), Value::Boolean(exactcallsign));
    dict
}

/// A miniature dataset exercising the interesting shapes: overlapping
/// prefixes ("K" vs "KH6"), multiple prefixes per country, and an
/// exact-callsign registration.
pub fn sample_dataset() -> Dictionary {
    let mut raw = Dictionary::new();
    raw.insert(
        "K".to_string(),
        Value::Dictionary(entry(
            "United States",
            "K",
            291,
            5,
            8,
            "NA",
            37.53,
            -91.67,
            -5,
            false,
        )),
    );
    raw.insert(
        "W".to_string(),
        Value::Dictionary(entry(
            "United States",
            "W",
            291,
            5,
            8,
            "NA",
            37.53,
            -91.67,
            -5,
            false,
        )),
    );
    raw.insert(
        "KH6".to_string(),
        Value::Dictionary(entry(
            "Hawaii", "KH6", 110, 31, 61, "OC", 21.3, -157.8, -10, false,
        )),
    );
    raw.insert(
        "JA".to_string(),
        Value::Dictionary(entry(
            "Japan", "JA", 339, 25, 45, "AS", 36.4, 138.38, 9, false,
        )),
    );
    raw.insert(
        "KG4".to_string(),
        Value::Dictionary(entry(
            "Guantanamo Bay",
            "KG4",
            105,
            8,
            11,
            "NA",
            20.0,
            -75.0,
            -5,
            true,
        )),
    );
    raw
}
