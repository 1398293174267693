use std::sync::Arc;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use log::debug;

use countrycache_core::countries::{
    Country, CountryRepositoryTrait, GdpSort, ListCountriesQuery, NewCountryRecord,
};
use countrycache_core::errors::Result;

use super::model::{name_key_of, CountryDB, NewCountryDB};
use crate::db::{get_connection, DbPool, DbTransactionExecutor};
use crate::errors::StorageError;
use crate::schema::countries::dsl as countries_dsl;
use crate::schema::refresh_status::dsl as status_dsl;

diesel::define_sql_function! {
    /// SQLite LOWER(), used for case-insensitive filter comparisons.
    fn lower(x: diesel::sql_types::Nullable<diesel::sql_types::Text>)
        -> diesel::sql_types::Nullable<diesel::sql_types::Text>;
}

pub struct CountryRepository {
    pool: Arc<DbPool>,
}

impl CountryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl CountryRepositoryTrait for CountryRepository {
    fn list(&self, query: &ListCountriesQuery) -> Result<Vec<Country>> {
        let mut conn = get_connection(&self.pool)?;

        let mut stmt = countries_dsl::countries.into_boxed();

        if let Some(region) = &query.region {
            stmt = stmt.filter(lower(countries_dsl::region).eq(region.to_lowercase()));
        }
        if let Some(currency) = &query.currency {
            stmt = stmt.filter(lower(countries_dsl::currency_code).eq(currency.to_lowercase()));
        }

        // Rows without a GDP figure sort last in both directions.
        stmt = match query.sort {
            Some(GdpSort::Desc) => stmt.order((
                countries_dsl::estimated_gdp.is_null(),
                countries_dsl::estimated_gdp.desc(),
            )),
            Some(GdpSort::Asc) => stmt.order((
                countries_dsl::estimated_gdp.is_null(),
                countries_dsl::estimated_gdp.asc(),
            )),
            None => stmt,
        };

        let rows = stmt
            .limit(query.limit)
            .offset(query.offset)
            .load::<CountryDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(Country::from).collect())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Country>> {
        let mut conn = get_connection(&self.pool)?;

        let row = countries_dsl::countries
            .filter(countries_dsl::name_key.eq(name_key_of(name)))
            .first::<CountryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.map(Country::from))
    }

    fn delete_by_name(&self, name: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;

        let removed = diesel::delete(
            countries_dsl::countries.filter(countries_dsl::name_key.eq(name_key_of(name))),
        )
        .execute(&mut conn)
        .map_err(StorageError::from)?;

        Ok(removed)
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        let total = countries_dsl::countries
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(total)
    }

    fn last_refreshed_at(&self) -> Result<Option<DateTime<Utc>>> {
        let mut conn = get_connection(&self.pool)?;

        let stamp = status_dsl::refresh_status
            .filter(status_dsl::id.eq(1))
            .select(status_dsl::last_refreshed_at)
            .first::<Option<String>>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .flatten();

        Ok(stamp.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        }))
    }

    fn replace_all(
        &self,
        records: &[NewCountryRecord],
        refreshed_at: DateTime<Utc>,
    ) -> Result<usize> {
        let rows: Vec<NewCountryDB> = records.iter().map(NewCountryDB::from).collect();
        let stamp = refreshed_at.to_rfc3339();

        let written = self.pool.execute(move |conn| {
            for row in &rows {
                diesel::insert_into(countries_dsl::countries)
                    .values(row)
                    .on_conflict(countries_dsl::name_key)
                    .do_update()
                    .set((
                        countries_dsl::name.eq(excluded(countries_dsl::name)),
                        countries_dsl::capital.eq(excluded(countries_dsl::capital)),
                        countries_dsl::region.eq(excluded(countries_dsl::region)),
                        countries_dsl::population.eq(excluded(countries_dsl::population)),
                        countries_dsl::currency_code.eq(excluded(countries_dsl::currency_code)),
                        countries_dsl::exchange_rate.eq(excluded(countries_dsl::exchange_rate)),
                        countries_dsl::estimated_gdp.eq(excluded(countries_dsl::estimated_gdp)),
                        countries_dsl::flag_url.eq(excluded(countries_dsl::flag_url)),
                        countries_dsl::last_refreshed_at
                            .eq(excluded(countries_dsl::last_refreshed_at)),
                    ))
                    .execute(conn)?;
            }

            diesel::update(status_dsl::refresh_status.filter(status_dsl::id.eq(1)))
                .set(status_dsl::last_refreshed_at.eq(Some(stamp.clone())))
                .execute(conn)?;

            Ok(rows.len())
        })?;

        debug!("upserted {written} countries");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::db;

    fn test_repository() -> (TempDir, Arc<DbPool>, CountryRepository) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("test.db");
        let pool = db::create_pool(path.to_str().expect("utf8 path")).expect("pool");
        db::run_migrations(&pool).expect("migrations");
        let repository = CountryRepository::new(pool.clone());
        (dir, pool, repository)
    }

    fn record(
        name: &str,
        population: i64,
        region: Option<&str>,
        code: Option<&str>,
        gdp: Option<f64>,
        refreshed_at: DateTime<Utc>,
    ) -> NewCountryRecord {
        NewCountryRecord {
            name: name.to_string(),
            capital: Some("Capital".to_string()),
            region: region.map(String::from),
            population,
            currency_code: code.map(String::from),
            exchange_rate: code.map(|_| 10.0),
            estimated_gdp: gdp,
            flag_url: None,
            last_refreshed_at: refreshed_at,
        }
    }

    #[test]
    fn test_status_starts_empty() {
        let (_dir, _pool, repository) = test_repository();
        assert_eq!(repository.count().unwrap(), 0);
        assert_eq!(repository.last_refreshed_at().unwrap(), None);
    }

    #[test]
    fn test_replace_all_inserts_and_stamps_status() {
        let (_dir, _pool, repository) = test_repository();
        let now = Utc::now();

        let written = repository
            .replace_all(
                &[
                    record("Ghana", 31_000_000, Some("Africa"), Some("GHS"), Some(3.1e12), now),
                    record("Togo", 8_000_000, Some("Africa"), None, Some(0.0), now),
                ],
                now,
            )
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(repository.count().unwrap(), 2);
        assert_eq!(repository.last_refreshed_at().unwrap(), Some(now));
    }

    #[test]
    fn test_upsert_overwrites_case_insensitive_name_in_place() {
        let (_dir, _pool, repository) = test_repository();
        let first_run = Utc::now();

        repository
            .replace_all(
                &[record("Ghana", 1, Some("Africa"), Some("GHS"), Some(1.0), first_run)],
                first_run,
            )
            .unwrap();
        let original = repository.find_by_name("ghana").unwrap().unwrap();

        let second_run = Utc::now();
        repository
            .replace_all(
                &[record("GHANA", 2, Some("West Africa"), None, None, second_run)],
                second_run,
            )
            .unwrap();

        assert_eq!(repository.count().unwrap(), 1);
        let updated = repository.find_by_name("Ghana").unwrap().unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.name, "GHANA");
        assert_eq!(updated.population, 2);
        assert_eq!(updated.region.as_deref(), Some("West Africa"));
        assert_eq!(updated.currency_code, None);
        assert_eq!(updated.estimated_gdp, None);
        assert_eq!(updated.last_refreshed_at, second_run);
    }

    #[test]
    fn test_find_and_delete_are_case_insensitive() {
        let (_dir, _pool, repository) = test_repository();
        let now = Utc::now();
        repository
            .replace_all(&[record("Ghana", 1, None, None, Some(0.0), now)], now)
            .unwrap();

        assert!(repository.find_by_name("gHaNa").unwrap().is_some());
        assert!(repository.find_by_name("Togo").unwrap().is_none());

        assert_eq!(repository.delete_by_name("Togo").unwrap(), 0);
        assert_eq!(repository.delete_by_name("GHANA").unwrap(), 1);
        assert_eq!(repository.count().unwrap(), 0);
    }

    #[test]
    fn test_list_filters_case_insensitively() {
        let (_dir, _pool, repository) = test_repository();
        let now = Utc::now();
        repository
            .replace_all(
                &[
                    record("Ghana", 1, Some("Africa"), Some("GHS"), Some(1.0), now),
                    record("Togo", 2, Some("Africa"), Some("XOF"), Some(2.0), now),
                    record("France", 3, Some("Europe"), Some("EUR"), Some(3.0), now),
                ],
                now,
            )
            .unwrap();

        let query = ListCountriesQuery {
            region: Some("aFrIcA".to_string()),
            ..ListCountriesQuery::default()
        };
        let rows = repository.list(&query).unwrap();
        assert_eq!(rows.len(), 2);

        let query = ListCountriesQuery {
            currency: Some("eur".to_string()),
            ..ListCountriesQuery::default()
        };
        let rows = repository.list(&query).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "France");
    }

    #[test]
    fn test_gdp_sort_places_nulls_last_in_both_directions() {
        let (_dir, _pool, repository) = test_repository();
        let now = Utc::now();
        repository
            .replace_all(
                &[
                    record("NoRate", 1, None, Some("XXX"), None, now),
                    record("Low", 2, None, Some("GHS"), Some(10.0), now),
                    record("High", 3, None, Some("GHS"), Some(100.0), now),
                ],
                now,
            )
            .unwrap();

        let query = ListCountriesQuery {
            sort: Some(GdpSort::Desc),
            ..ListCountriesQuery::default()
        };
        let names: Vec<String> = repository
            .list(&query)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["High", "Low", "NoRate"]);

        let query = ListCountriesQuery {
            sort: Some(GdpSort::Asc),
            ..ListCountriesQuery::default()
        };
        let names: Vec<String> = repository
            .list(&query)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Low", "High", "NoRate"]);
    }

    #[test]
    fn test_limit_and_offset_paginate() {
        let (_dir, _pool, repository) = test_repository();
        let now = Utc::now();
        let records: Vec<NewCountryRecord> = (0..5)
            .map(|i| record(&format!("Country{i}"), i, None, None, Some(i as f64), now))
            .collect();
        repository.replace_all(&records, now).unwrap();

        let query = ListCountriesQuery {
            limit: 2,
            offset: 3,
            ..ListCountriesQuery::default()
        };
        let rows = repository.list(&query).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_failed_transaction_rolls_back_every_write() {
        let (_dir, pool, repository) = test_repository();
        let now = Utc::now();

        let result: Result<()> = pool.execute(|conn| {
            diesel::insert_into(countries_dsl::countries)
                .values(&NewCountryDB::from(&record(
                    "Ghana",
                    1,
                    None,
                    None,
                    Some(0.0),
                    now,
                )))
                .execute(conn)?;
            diesel::update(status_dsl::refresh_status.filter(status_dsl::id.eq(1)))
                .set(status_dsl::last_refreshed_at.eq(Some(now.to_rfc3339())))
                .execute(conn)?;

            // Mid-batch failure after both writes: everything must roll back.
            Err(StorageError::Internal("injected failure".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(repository.count().unwrap(), 0);
        assert_eq!(repository.last_refreshed_at().unwrap(), None);
    }

    #[test]
    fn test_table_exists_probe() {
        let (_dir, pool, _repository) = test_repository();
        let mut conn = db::get_connection(&pool).unwrap();
        assert!(db::table_exists(&mut conn, "countries").unwrap());
        assert!(db::table_exists(&mut conn, "refresh_status").unwrap());
        assert!(!db::table_exists(&mut conn, "quotes").unwrap());
    }
}
