//! Wire models for the two external sources.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Mapping of currency code to its rate against the fixed USD base.
pub type RateMap = HashMap<String, f64>;

/// One country record as returned by the countries API.
///
/// Every field is optional at the wire level; the sync transform decides
/// which records are usable and silently drops the rest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub population: Option<i64>,
    #[serde(default)]
    pub currencies: Option<Vec<CurrencyPayload>>,
    #[serde(default)]
    pub flag: Option<String>,
}

/// One entry of a country's currency list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrencyPayload {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Accepts a JSON number and maps anything else (string, null, missing)
/// to `None`, so a single malformed record cannot fail the whole payload.
fn numeric_or_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64)))
}
