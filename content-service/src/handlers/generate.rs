use crate::models::{GenerationRequest, GenerationResult, Platform};
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;

/// Parameters of `POST /generate_content`, from the query string or a JSON body.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentParams {
    pub idea: String,
    pub target_audience: String,
    pub platform: String,
    pub post_category: String,
}

impl From<GenerateContentParams> for GenerationRequest {
    fn from(params: GenerateContentParams) -> Self {
        Self {
            idea: params.idea,
            target_audience: params.target_audience,
            platform: Platform::from(params.platform),
            post_category: params.post_category,
        }
    }
}

pub async fn generate_content(
    State(state): State<AppState>,
    query: Option<Query<GenerateContentParams>>,
    body: Option<Json<GenerateContentParams>>,
) -> Result<Json<GenerationResult>, AppError> {
    let params = match (query, body) {
        (Some(Query(params)), _) => params,
        (None, Some(Json(params))) => params,
        (None, None) => {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "idea, target_audience, platform and post_category are required"
            )))
        }
    };

    let result = state.generator.generate(params.into()).await;
    Ok(Json(result))
}
