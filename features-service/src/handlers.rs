use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use common::errors::AppError;
use common::models::{FeatureCollection, FeatureRequest, WeatherStationFeature};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::store::FeatureStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FeatureStore>,
}

fn read_body(payload: Result<Json<FeatureRequest>, JsonRejection>) -> Result<FeatureRequest, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::validation(e.body_text()))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "features-service" }))
}

#[utoipa::path(
    get,
    path = "/api/features",
    responses(
        (status = 200, description = "All features in insertion order", body = FeatureCollection)
    ),
    tag = "features"
)]
pub async fn list_features(State(state): State<AppState>) -> Json<FeatureCollection> {
    Json(FeatureCollection::new(state.store.list().await))
}

#[utoipa::path(
    get,
    path = "/api/features/{id}",
    params(
        ("id" = Uuid, Path, description = "Feature ID")
    ),
    responses(
        (status = 200, description = "Feature found", body = WeatherStationFeature),
        (status = 404, description = "Feature not found")
    ),
    tag = "features"
)]
pub async fn get_feature(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WeatherStationFeature>, AppError> {
    state
        .store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("feature {}", id)))
}

#[utoipa::path(
    post,
    path = "/api/features",
    request_body = FeatureRequest,
    responses(
        (status = 200, description = "Feature created", body = WeatherStationFeature),
        (status = 400, description = "Malformed body")
    ),
    tag = "features"
)]
pub async fn create_feature(
    State(state): State<AppState>,
    payload: Result<Json<FeatureRequest>, JsonRejection>,
) -> Result<Json<WeatherStationFeature>, AppError> {
    let request = read_body(payload)?;
    let feature = state.store.create(request.properties).await;

    info!(id = %feature.id, station = %feature.properties.station, "Feature created");
    Ok(Json(feature))
}

#[utoipa::path(
    put,
    path = "/api/features/{id}",
    params(
        ("id" = Uuid, Path, description = "Feature ID")
    ),
    request_body = FeatureRequest,
    responses(
        (status = 200, description = "Feature updated", body = WeatherStationFeature),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Feature not found")
    ),
    tag = "features"
)]
pub async fn update_feature(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<FeatureRequest>, JsonRejection>,
) -> Result<Json<WeatherStationFeature>, AppError> {
    let request = read_body(payload)?;
    let feature = state
        .store
        .update(id, request.properties)
        .await
        .ok_or_else(|| AppError::not_found(format!("feature {}", id)))?;

    info!(id = %id, "Feature updated");
    Ok(Json(feature))
}

#[utoipa::path(
    delete,
    path = "/api/features/{id}",
    params(
        ("id" = Uuid, Path, description = "Feature ID")
    ),
    responses(
        (status = 204, description = "Feature deleted"),
        (status = 404, description = "Feature not found")
    ),
    tag = "features"
)]
pub async fn delete_feature(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete(id).await {
        return Err(AppError::not_found(format!("feature {}", id)));
    }

    info!(id = %id, "Feature deleted");
    Ok(StatusCode::NO_CONTENT)
}
