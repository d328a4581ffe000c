use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use solstice_core::models::card::Card;
use solstice_core::models::cue::Cue;
use solstice_core::normalize::normalize_cues;
use solstice_llm::coerce::extract_items;
use solstice_llm::prompts::cue_prompt;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const CONTEXT: &str = "Error generating cues";

#[derive(Deserialize)]
pub struct CueRequest {
    pub card: Card,
}

#[derive(Serialize)]
pub struct CueResponse {
    pub cues: Vec<Cue>,
}

pub async fn generate_cues(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(req): ApiJson<CueRequest>,
) -> Result<Json<CueResponse>, ApiError> {
    let card = req.card;
    tracing::info!(title = %card.title, user = %user.user_id, "generating cues for card");

    let prompt = cue_prompt(&card);
    let text = state
        .gateway
        .complete(&prompt)
        .await
        .map_err(ApiError::llm(CONTEXT))?;

    let mut cues: Vec<Cue> = extract_items(&text, "cues").map_err(ApiError::llm(CONTEXT))?;
    normalize_cues(&mut cues);

    tracing::info!(title = %card.title, count = cues.len(), "generated cues");

    Ok(Json(CueResponse { cues }))
}
