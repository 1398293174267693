//! The external data sync: fetch, transform, upsert, regenerate.

mod refresh_service;

pub use refresh_service::{RefreshService, RefreshServiceTrait};
