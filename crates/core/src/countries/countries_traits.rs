use chrono::{DateTime, Utc};

use crate::countries::countries_model::{
    CacheStatus, Country, ListCountriesQuery, NewCountryRecord,
};
use crate::errors::Result;

/// Persistence contract for cached countries and the refresh-status
/// singleton.
pub trait CountryRepositoryTrait: Send + Sync {
    fn list(&self, query: &ListCountriesQuery) -> Result<Vec<Country>>;

    /// Case-insensitive exact-name lookup.
    fn find_by_name(&self, name: &str) -> Result<Option<Country>>;

    /// Returns the number of rows removed (0 or 1).
    fn delete_by_name(&self, name: &str) -> Result<usize>;

    fn count(&self) -> Result<i64>;

    /// Timestamp of the most recent successful sync, if any.
    fn last_refreshed_at(&self) -> Result<Option<DateTime<Utc>>>;

    /// Upserts every record and stamps the status singleton inside one
    /// transaction; either all writes land or none do.
    fn replace_all(
        &self,
        records: &[NewCountryRecord],
        refreshed_at: DateTime<Utc>,
    ) -> Result<usize>;
}

/// Read/delete operations exposed over HTTP.
pub trait CountryServiceTrait: Send + Sync {
    fn list_countries(&self, query: &ListCountriesQuery) -> Result<Vec<Country>>;
    fn get_country(&self, name: &str) -> Result<Country>;
    fn delete_country(&self, name: &str) -> Result<()>;
    fn status(&self) -> Result<CacheStatus>;
}
