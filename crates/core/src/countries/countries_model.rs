//! Country domain models and query validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, MAX_LIST_OFFSET};
use crate::errors::ValidationFailure;

/// One cached country row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: DateTime<Utc>,
}

/// A transformed record produced by one sync run, before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCountryRecord {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: DateTime<Utc>,
}

/// Result summary returned by a successful sync run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RefreshSummary {
    pub message: String,
    pub count: usize,
    pub last_refreshed_at: DateTime<Utc>,
}

/// Cache totals reported by `GET /status`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CacheStatus {
    pub total_countries: i64,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// GDP sort orders accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GdpSort {
    Desc,
    Asc,
}

impl GdpSort {
    /// Unknown values are ignored rather than rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "gdp_desc" => Some(Self::Desc),
            "gdp_asc" => Some(Self::Asc),
            _ => None,
        }
    }
}

/// Raw, unvalidated query parameters as they arrive over HTTP.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListParams {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Validated listing parameters, safe to hand to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCountriesQuery {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: Option<GdpSort>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ListCountriesQuery {
    fn default() -> Self {
        Self {
            region: None,
            currency: None,
            sort: None,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

impl ListCountriesQuery {
    /// Validates and normalizes raw query parameters, collecting every
    /// failing field into one [`ValidationFailure`].
    pub fn parse(raw: &RawListParams) -> Result<Self, ValidationFailure> {
        let mut failure = ValidationFailure::new();

        let region = match normalize_filter(raw.region.as_deref()) {
            Ok(v) => v,
            Err(msg) => {
                failure.push("region", msg);
                None
            }
        };
        let currency = match normalize_filter(raw.currency.as_deref()) {
            Ok(v) => v,
            Err(msg) => {
                failure.push("currency", msg);
                None
            }
        };

        let sort = raw.sort.as_deref().and_then(GdpSort::parse);

        let limit = match parse_bounded(raw.limit.as_deref(), 1, MAX_LIST_LIMIT, DEFAULT_LIST_LIMIT)
        {
            Ok(v) => v,
            Err(msg) => {
                failure.push("limit", msg);
                DEFAULT_LIST_LIMIT
            }
        };
        let offset = match parse_bounded(raw.offset.as_deref(), 0, MAX_LIST_OFFSET, 0) {
            Ok(v) => v,
            Err(msg) => {
                failure.push("offset", msg);
                0
            }
        };

        if failure.is_empty() {
            Ok(Self {
                region,
                currency,
                sort,
                limit,
                offset,
            })
        } else {
            Err(failure)
        }
    }
}

fn normalize_filter(raw: Option<&str>) -> Result<Option<String>, &'static str> {
    match raw {
        None => Ok(None),
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err("must be a non-empty string")
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
    }
}

fn parse_bounded(raw: Option<&str>, min: i64, max: i64, default: i64) -> Result<i64, String> {
    match raw {
        None => Ok(default),
        Some(s) => match s.trim().parse::<i64>() {
            Ok(v) if (min..=max).contains(&v) => Ok(v),
            Ok(_) => Err(format!("must be between {min} and {max}")),
            Err(_) => Err("must be an integer".to_string()),
        },
    }
}

/// Validates a `:name` path parameter: non-empty after trimming.
pub fn validate_name_param(raw: &str) -> Result<String, ValidationFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationFailure::single("name", "is required"))
    } else {
        Ok(trimmed.to_string())
    }
}
