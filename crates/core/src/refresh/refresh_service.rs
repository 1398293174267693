use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{error, info};
use tokio::sync::Mutex;

use countrycache_country_data::{CountryPayload, CountrySource, ExchangeRateSource, RateMap};

use crate::constants::{GDP_MULTIPLIER_MAX, GDP_MULTIPLIER_MIN};
use crate::countries::{CountryRepositoryTrait, NewCountryRecord, RefreshSummary};
use crate::errors::Result;
use crate::math::{random_between, safe_divide};
use crate::summary::SummaryArtifactService;

/// Orchestrates one sync run: concurrent fetch from both sources,
/// per-record transform, one atomic upsert, post-commit artifact
/// regeneration.
#[async_trait]
pub trait RefreshServiceTrait: Send + Sync {
    async fn refresh(&self) -> Result<RefreshSummary>;
}

pub struct RefreshService {
    repository: Arc<dyn CountryRepositoryTrait>,
    countries: Arc<dyn CountrySource>,
    rates: Arc<dyn ExchangeRateSource>,
    artifacts: Arc<SummaryArtifactService>,
    // Serializes whole runs: the store transaction alone cannot stop two
    // concurrent runs from interleaving their artifact regeneration.
    run_lock: Mutex<()>,
}

impl RefreshService {
    pub fn new(
        repository: Arc<dyn CountryRepositoryTrait>,
        countries: Arc<dyn CountrySource>,
        rates: Arc<dyn ExchangeRateSource>,
        artifacts: Arc<SummaryArtifactService>,
    ) -> Self {
        Self {
            repository,
            countries,
            rates,
            artifacts,
            run_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl RefreshServiceTrait for RefreshService {
    async fn refresh(&self) -> Result<RefreshSummary> {
        let _guard = self.run_lock.lock().await;

        info!("starting refresh of country and exchange rate data");
        let (countries, rates) =
            tokio::join!(self.countries.fetch_countries(), self.rates.fetch_rates());
        let countries = countries?;
        let rates = rates?;

        let refreshed_at = Utc::now();
        let records = transform_countries(countries, &rates, refreshed_at);

        info!(
            "fetched {} usable countries, writing to database",
            records.len()
        );
        let count = self.repository.replace_all(&records, refreshed_at)?;

        // The transaction has committed; a failed render must not undo
        // an already-successful sync.
        if let Err(e) = self.artifacts.regenerate(&records, refreshed_at) {
            error!("summary artifact regeneration failed: {e}");
        }

        info!("refresh complete, {count} records written");
        Ok(RefreshSummary {
            message: "Countries refreshed successfully".to_string(),
            count,
            last_refreshed_at: refreshed_at,
        })
    }
}

/// Transforms raw payload records into rows for one sync run.
///
/// Order-preserving. Records without a usable name or population are
/// dropped. The GDP multiplier is sampled fresh for every record, so the
/// figure is intentionally not reproducible between runs.
pub(crate) fn transform_countries(
    countries: Vec<CountryPayload>,
    rates: &RateMap,
    refreshed_at: DateTime<Utc>,
) -> Vec<NewCountryRecord> {
    let mut records = Vec::with_capacity(countries.len());

    for country in countries {
        let name = match country.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => continue,
        };
        let population = match country.population {
            Some(p) => p,
            None => continue,
        };

        let first_code = country
            .currencies
            .as_ref()
            .and_then(|list| list.first())
            .and_then(|currency| currency.code.clone());

        let (currency_code, exchange_rate, estimated_gdp) = match first_code {
            None => (None, None, Some(0.0)),
            Some(code) => {
                let rate = rates.get(&code).copied();
                let gdp = match rate {
                    Some(r) if r != 0.0 => {
                        let multiplier = random_between(GDP_MULTIPLIER_MIN, GDP_MULTIPLIER_MAX);
                        Some(safe_divide(population as f64 * multiplier as f64, r))
                    }
                    _ => None,
                };
                (Some(code), rate, gdp)
            }
        };

        records.push(NewCountryRecord {
            name,
            capital: country.capital,
            region: country.region,
            population,
            currency_code,
            exchange_rate,
            estimated_gdp,
            flag_url: country.flag,
            last_refreshed_at: refreshed_at,
        });
    }

    records
}
