use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use countrycache_core::countries::CacheStatus;

use crate::error::ApiResult;
use crate::AppState;

async fn get_status(State(state): State<Arc<AppState>>) -> ApiResult<Json<CacheStatus>> {
    Ok(Json(state.country_service.status()?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(get_status))
}
