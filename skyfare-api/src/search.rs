use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use skyfare_core::{SearchParams, SearchResult};
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights/search", post(search_flights))
        .route("/health", get(health))
}

/// POST /v1/flights/search
async fn search_flights(
    State(state): State<AppState>,
    Json(params): Json<SearchParams>,
) -> Result<Json<SearchResult>, AppError> {
    let result = state.orchestrator.search(&params).await?;
    tracing::info!("Search returned {} offers", result.len());
    Ok(Json(result))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "fallbackEnabled": state.orchestrator.config().fallback_enabled,
    }))
}
