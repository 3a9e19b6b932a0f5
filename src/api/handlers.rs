use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::Recommendation;
use crate::services;

use super::AppState;

// Request/Response types

/// TMDB id as it appears on the wire: clients send either a JSON number or a
/// string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TmdbId {
    Number(i64),
    Text(String),
}

impl TmdbId {
    fn to_raw(&self) -> String {
        match self {
            TmdbId::Number(n) => n.to_string(),
            TmdbId::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub tmdb_id: Option<TmdbId>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub success: bool,
    /// The query id, echoed back as the client sent it
    pub tmdb_id: TmdbId,
    pub recommendations: Vec<Recommendation>,
}

// Handlers

/// Service info endpoint
pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "Movie Recommendation API is running",
        "endpoint": "/recommend-by-id (POST)",
        "sample_request": { "tmdb_id": "12259" }
    }))
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Returns the top-K movies most similar to the requested TMDB id.
///
/// An unknown id answers 404 and an unparseable one 400, so clients can tell
/// a valid-but-absent movie apart from bad input.
pub async fn recommend_by_id(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    let tmdb_id = request
        .tmdb_id
        .ok_or_else(|| AppError::InvalidInput("TMDB ID is required".to_string()))?;

    let recommendations =
        services::recommend_by_id(&state.catalog, &tmdb_id.to_raw(), state.top_k)?;

    info!(
        tmdb_id = %tmdb_id.to_raw(),
        count = recommendations.len(),
        "served recommendations"
    );

    Ok(Json(RecommendResponse {
        success: true,
        tmdb_id,
        recommendations,
    }))
}
