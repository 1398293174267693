//! Provider traits, the seam between the sync service and the remotes.

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::models::{CountryPayload, RateMap};

/// A remote source for the full country list.
#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn fetch_countries(&self) -> Result<Vec<CountryPayload>, SourceError>;
}

/// A remote source for USD-based exchange rates.
#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateMap, SourceError>;
}
