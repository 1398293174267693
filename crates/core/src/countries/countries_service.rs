use std::sync::Arc;

use log::debug;

use crate::countries::countries_model::{CacheStatus, Country, ListCountriesQuery};
use crate::countries::countries_traits::{CountryRepositoryTrait, CountryServiceTrait};
use crate::errors::{Error, Result};

/// Read/delete service over the cached country set.
pub struct CountryService {
    repository: Arc<dyn CountryRepositoryTrait>,
}

impl CountryService {
    pub fn new(repository: Arc<dyn CountryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl CountryServiceTrait for CountryService {
    fn list_countries(&self, query: &ListCountriesQuery) -> Result<Vec<Country>> {
        self.repository.list(query)
    }

    fn get_country(&self, name: &str) -> Result<Country> {
        self.repository.find_by_name(name)?.ok_or(Error::NotFound)
    }

    fn delete_country(&self, name: &str) -> Result<()> {
        let removed = self.repository.delete_by_name(name)?;
        if removed == 0 {
            return Err(Error::NotFound);
        }
        debug!("deleted country '{name}'");
        Ok(())
    }

    fn status(&self) -> Result<CacheStatus> {
        Ok(CacheStatus {
            total_countries: self.repository.count()?,
            last_refreshed_at: self.repository.last_refreshed_at()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{DateTime, Utc};

    use super::*;
    use crate::countries::countries_model::NewCountryRecord;

    #[derive(Default)]
    struct InMemoryRepository {
        rows: Mutex<Vec<Country>>,
    }

    impl CountryRepositoryTrait for InMemoryRepository {
        fn list(&self, _query: &ListCountriesQuery) -> Result<Vec<Country>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        fn find_by_name(&self, name: &str) -> Result<Option<Country>> {
            let key = name.trim().to_lowercase();
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.name.to_lowercase() == key)
                .cloned())
        }

        fn delete_by_name(&self, name: &str) -> Result<usize> {
            let key = name.trim().to_lowercase();
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|c| c.name.to_lowercase() != key);
            Ok(before - rows.len())
        }

        fn count(&self) -> Result<i64> {
            Ok(self.rows.lock().unwrap().len() as i64)
        }

        fn last_refreshed_at(&self) -> Result<Option<DateTime<Utc>>> {
            Ok(None)
        }

        fn replace_all(
            &self,
            _records: &[NewCountryRecord],
            _refreshed_at: DateTime<Utc>,
        ) -> Result<usize> {
            unimplemented!("not exercised by these tests")
        }
    }

    fn country(name: &str) -> Country {
        Country {
            id: 1,
            name: name.to_string(),
            capital: None,
            region: None,
            population: 1_000,
            currency_code: None,
            exchange_rate: None,
            estimated_gdp: Some(0.0),
            flag_url: None,
            last_refreshed_at: Utc::now(),
        }
    }

    #[test]
    fn test_get_country_is_case_insensitive() {
        let repo = Arc::new(InMemoryRepository::default());
        repo.rows.lock().unwrap().push(country("Ghana"));
        let service = CountryService::new(repo);

        assert_eq!(service.get_country("gHaNa").unwrap().name, "Ghana");
    }

    #[test]
    fn test_missing_country_is_not_found() {
        let service = CountryService::new(Arc::new(InMemoryRepository::default()));
        assert!(matches!(service.get_country("Ghana"), Err(Error::NotFound)));
        assert!(matches!(
            service.delete_country("Ghana"),
            Err(Error::NotFound)
        ));
    }

    #[test]
    fn test_delete_removes_exactly_one_row() {
        let repo = Arc::new(InMemoryRepository::default());
        repo.rows.lock().unwrap().push(country("Ghana"));
        repo.rows.lock().unwrap().push(country("Togo"));
        let service = CountryService::new(repo.clone());

        service.delete_country("GHANA").unwrap();
        assert_eq!(service.status().unwrap().total_countries, 1);
    }
}
