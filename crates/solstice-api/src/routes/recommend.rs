use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use solstice_core::models::routine::RoutineRecommendation;
use solstice_core::normalize::normalize_routines;
use solstice_llm::coerce::extract_items;
use solstice_llm::prompts::recommend_prompt;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const CONTEXT: &str = "Error generating recommendations";

#[derive(Deserialize)]
pub struct RecommendRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub routines: Vec<RoutineRecommendation>,
}

/// Suggest routines from a user's interest tags.
pub async fn recommend_routines(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(req): ApiJson<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let tags = req.tags.unwrap_or_default();
    tracing::info!(
        user_id = %req.user_id,
        caller = %user.user_id,
        tags = ?tags,
        "generating recommendations"
    );

    let prompt = recommend_prompt(&req.user_id, &tags);
    let text = state
        .gateway
        .complete(&prompt)
        .await
        .map_err(ApiError::llm(CONTEXT))?;

    let mut routines: Vec<RoutineRecommendation> =
        extract_items(&text, "routines").map_err(ApiError::llm(CONTEXT))?;
    normalize_routines(&mut routines);

    tracing::info!(user_id = %req.user_id, count = routines.len(), "generated recommendations");

    Ok(Json(RecommendResponse { routines }))
}
