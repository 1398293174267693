//! Database models for cached countries.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use countrycache_core::countries::{Country, NewCountryRecord};

/// Database row for a cached country.
#[derive(Queryable, Identifiable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::countries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CountryDB {
    pub id: i32,
    pub name: String,
    pub name_key: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: String,
}

/// Insert/upsert payload for one transformed record.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::countries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewCountryDB {
    pub name: String,
    pub name_key: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: String,
}

/// Lowercased, trimmed natural key backing the case-insensitive
/// uniqueness constraint.
pub fn name_key_of(name: &str) -> String {
    name.trim().to_lowercase()
}

impl From<CountryDB> for Country {
    fn from(db: CountryDB) -> Self {
        let last_refreshed_at = DateTime::parse_from_rfc3339(&db.last_refreshed_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Country {
            id: db.id,
            name: db.name,
            capital: db.capital,
            region: db.region,
            population: db.population,
            currency_code: db.currency_code,
            exchange_rate: db.exchange_rate,
            estimated_gdp: db.estimated_gdp,
            flag_url: db.flag_url,
            last_refreshed_at,
        }
    }
}

impl From<&NewCountryRecord> for NewCountryDB {
    fn from(record: &NewCountryRecord) -> Self {
        NewCountryDB {
            name: record.name.clone(),
            name_key: name_key_of(&record.name),
            capital: record.capital.clone(),
            region: record.region.clone(),
            population: record.population,
            currency_code: record.currency_code.clone(),
            exchange_rate: record.exchange_rate,
            estimated_gdp: record.estimated_gdp,
            flag_url: record.flag_url.clone(),
            last_refreshed_at: record.last_refreshed_at.to_rfc3339(),
        }
    }
}
