//! REST Countries provider.
//!
//! Fetches the full country list in one request. The URL pins the field
//! set so the payload stays small.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::{SourceError, COUNTRIES_SOURCE};
use crate::models::CountryPayload;
use crate::traits::CountrySource;

/// Default endpoint, overridable through configuration.
pub const DEFAULT_COUNTRIES_URL: &str =
    "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies";

pub struct RestCountriesProvider {
    client: Client,
    url: String,
}

impl RestCountriesProvider {
    /// Creates a provider with the request timeout baked into the client.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CountrySource for RestCountriesProvider {
    async fn fetch_countries(&self) -> Result<Vec<CountryPayload>, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SourceError::Unavailable {
                source_name: COUNTRIES_SOURCE,
                message: e.to_string(),
            })?;

        let countries = response
            .json::<Vec<CountryPayload>>()
            .await
            .map_err(|e| SourceError::InvalidPayload {
                source_name: COUNTRIES_SOURCE,
                message: e.to_string(),
            })?;

        debug!("countries API returned {} records", countries.len());
        Ok(countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_requests_needed_fields() {
        for field in ["name", "capital", "region", "population", "flag", "currencies"] {
            assert!(DEFAULT_COUNTRIES_URL.contains(field));
        }
    }
}
