//! Countries module - domain models, services, and traits.

mod countries_model;
mod countries_service;
mod countries_traits;

pub use countries_model::{
    validate_name_param, CacheStatus, Country, GdpSort, ListCountriesQuery, NewCountryRecord,
    RawListParams, RefreshSummary,
};
pub use countries_service::CountryService;
pub use countries_traits::{CountryRepositoryTrait, CountryServiceTrait};
