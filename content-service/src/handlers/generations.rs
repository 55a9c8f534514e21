use crate::models::{GenerationFilter, StoredGeneration, DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT};
use crate::services::GenerationStore;
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use service_core::error::AppError;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ListGenerationsParams {
    pub platform: Option<String>,
    pub post_category: Option<String>,
    pub target_audience: Option<String>,
    pub limit: Option<i64>,
}

fn store(state: &AppState) -> Result<&Arc<dyn GenerationStore>, AppError> {
    state
        .generator
        .store()
        .ok_or_else(|| AppError::ServiceUnavailable("persistence is not configured".to_string()))
}

pub async fn list_generations(
    State(state): State<AppState>,
    Query(params): Query<ListGenerationsParams>,
) -> Result<Json<Vec<StoredGeneration>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_QUERY_LIMIT)
        .clamp(1, MAX_QUERY_LIMIT);

    let filter = GenerationFilter {
        platform: params.platform,
        post_category: params.post_category,
        target_audience: params.target_audience,
    };

    let records = store(&state)?.query(&filter, limit).await?;
    Ok(Json(records))
}

pub async fn get_generation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredGeneration>, AppError> {
    store(&state)?
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Generation {} not found", id)))
}

pub async fn delete_generation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let deleted = store(&state)?.delete_by_id(&id).await?;

    if deleted {
        tracing::info!(document_id = %id, "Deleted generation record");
    }

    Ok(Json(json!({ "deleted": deleted })))
}
