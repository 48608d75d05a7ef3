use axum::{
    Json,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::WebError;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub async fn welcome() -> Response {
    Json(serde_json::json!({
        "message": "Welcome to P10 API - F1 Prediction Game"
    }))
    .into_response()
}

pub async fn route_not_found() -> WebError {
    WebError::RouteNotFound
}
