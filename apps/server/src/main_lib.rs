use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use countrycache_core::countries::{CountryService, CountryServiceTrait};
use countrycache_core::refresh::{RefreshService, RefreshServiceTrait};
use countrycache_core::summary::{FileArtifactStore, SummaryArtifactService, SvgSummaryGenerator};
use countrycache_country_data::{OpenErApiProvider, RestCountriesProvider};
use countrycache_storage_sqlite::{db, CountryRepository};

use crate::config::Config;

pub struct AppState {
    pub country_service: Arc<dyn CountryServiceTrait>,
    pub refresh_service: Arc<dyn RefreshServiceTrait>,
    pub artifact_service: Arc<SummaryArtifactService>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format =
        std::env::var("COUNTRYCACHE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);
    // The summary artifact lives next to the database file.
    let data_root = Path::new(&db_path)
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let repository = Arc::new(CountryRepository::new(pool.clone()));
    let country_service = Arc::new(CountryService::new(repository.clone()));

    let countries_source = Arc::new(RestCountriesProvider::new(
        config.countries_url.clone(),
        config.fetch_timeout,
    ));
    let rates_source = Arc::new(OpenErApiProvider::new(
        config.rates_url.clone(),
        config.fetch_timeout,
    ));

    let artifact_service = Arc::new(SummaryArtifactService::new(
        Arc::new(SvgSummaryGenerator),
        Arc::new(FileArtifactStore::new(data_root.join("summary.svg"))),
    ));

    let refresh_service = Arc::new(RefreshService::new(
        repository,
        countries_source,
        rates_source,
        artifact_service.clone(),
    ));

    Ok(Arc::new(AppState {
        country_service,
        refresh_service,
        artifact_service,
        db_path,
    }))
}
