//! Exchange-rate provider backed by open.er-api.com.
//!
//! Returns a code-to-rate map against a fixed USD base. A payload
//! without the `rates` mapping is an invalid-payload failure, same as a
//! fetch failure.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::{SourceError, RATES_SOURCE};
use crate::models::RateMap;
use crate::traits::ExchangeRateSource;

/// Default endpoint, overridable through configuration.
pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";

#[derive(Debug, Deserialize)]
struct RatesEnvelope {
    rates: RateMap,
}

pub struct OpenErApiProvider {
    client: Client,
    url: String,
}

impl OpenErApiProvider {
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
impl ExchangeRateSource for OpenErApiProvider {
    async fn fetch_rates(&self) -> Result<RateMap, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SourceError::Unavailable {
                source_name: RATES_SOURCE,
                message: e.to_string(),
            })?;

        let envelope = response
            .json::<RatesEnvelope>()
            .await
            .map_err(|e| SourceError::InvalidPayload {
                source_name: RATES_SOURCE,
                message: e.to_string(),
            })?;

        debug!("exchange rates API returned {} rates", envelope.rates.len());
        Ok(envelope.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_requires_rates_mapping() {
        let ok: Result<RatesEnvelope, _> =
            serde_json::from_str(r#"{"result": "success", "rates": {"GHS": 10.5}}"#);
        assert_eq!(ok.unwrap().rates.get("GHS"), Some(&10.5));

        let missing: Result<RatesEnvelope, _> = serde_json::from_str(r#"{"result": "success"}"#);
        assert!(missing.is_err());

        let non_numeric: Result<RatesEnvelope, _> =
            serde_json::from_str(r#"{"rates": {"GHS": "ten"}}"#);
        assert!(non_numeric.is_err());
    }
}
