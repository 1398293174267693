use std::{net::SocketAddr, time::Duration};

use countrycache_country_data::{DEFAULT_COUNTRIES_URL, DEFAULT_RATES_URL};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub countries_url: String,
    pub rates_url: String,
    /// Timeout applied to each outbound fetch in the sync routine.
    pub fetch_timeout: Duration,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("COUNTRYCACHE_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
            .parse()
            .expect("Invalid COUNTRYCACHE_LISTEN_ADDR");
        let db_path =
            std::env::var("COUNTRYCACHE_DB_PATH").unwrap_or_else(|_| "./data/app.db".into());
        let countries_url = std::env::var("COUNTRYCACHE_COUNTRIES_URL")
            .unwrap_or_else(|_| DEFAULT_COUNTRIES_URL.into());
        let rates_url =
            std::env::var("COUNTRYCACHE_RATES_URL").unwrap_or_else(|_| DEFAULT_RATES_URL.into());
        let fetch_timeout_ms: u64 = std::env::var("COUNTRYCACHE_EXTERNAL_TIMEOUT_MS")
            .unwrap_or_else(|_| "15000".into())
            .parse()
            .unwrap_or(15_000);
        let cors_allow = std::env::var("COUNTRYCACHE_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout_ms: u64 = std::env::var("COUNTRYCACHE_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30_000);

        Self {
            listen_addr,
            db_path,
            countries_url,
            rates_url,
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            cors_allow,
            request_timeout: Duration::from_millis(request_timeout_ms),
        }
    }
}
