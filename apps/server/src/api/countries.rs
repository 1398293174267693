use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use countrycache_core::countries::{
    validate_name_param, Country, ListCountriesQuery, RawListParams, RefreshSummary,
};
use countrycache_core::errors::Error as CoreError;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

async fn refresh_countries(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshSummary>> {
    let summary = state.refresh_service.refresh().await?;
    Ok(Json(summary))
}

async fn list_countries(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawListParams>,
) -> ApiResult<Json<Vec<Country>>> {
    let query = ListCountriesQuery::parse(&raw).map_err(CoreError::from)?;
    Ok(Json(state.country_service.list_countries(&query)?))
}

async fn get_country(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Country>> {
    let name = validate_name_param(&name).map_err(CoreError::from)?;
    Ok(Json(state.country_service.get_country(&name)?))
}

async fn delete_country(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Value>> {
    let name = validate_name_param(&name).map_err(CoreError::from)?;
    state.country_service.delete_country(&name)?;
    Ok(Json(json!({ "message": format!("{name} deleted successfully") })))
}

async fn summary_image(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    match state.artifact_service.latest()? {
        Some(artifact) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, artifact.content_type)],
            artifact.bytes,
        )
            .into_response()),
        None => Err(ApiError::NotFound("Summary image not found".to_string())),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/countries/refresh", post(refresh_countries))
        .route("/countries/image", get(summary_image))
        .route("/countries", get(list_countries))
        .route("/countries/{name}", get(get_country).delete(delete_country))
}
