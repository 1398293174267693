//! External data sources for countrycache.
//!
//! Each provider wraps one remote API behind an async trait so the sync
//! service can be exercised against mocks. Errors always carry the name
//! of the source that failed, because the sync routine has to report
//! which of the two remotes broke a run.

pub mod countries_api;
pub mod errors;
pub mod exchange_rates;
pub mod models;
pub mod traits;

pub use countries_api::{RestCountriesProvider, DEFAULT_COUNTRIES_URL};
pub use errors::{SourceError, COUNTRIES_SOURCE, RATES_SOURCE};
pub use exchange_rates::{OpenErApiProvider, DEFAULT_RATES_URL};
pub use models::{CountryPayload, CurrencyPayload, RateMap};
pub use traits::{CountrySource, ExchangeRateSource};
