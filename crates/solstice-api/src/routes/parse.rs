use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use url::Url;

use solstice_core::models::card::Card;
use solstice_core::normalize::normalize_cards;
use solstice_core::platform::Platform;
use solstice_llm::coerce::extract_items;
use solstice_llm::prompts::parse_url_prompt;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const CONTEXT: &str = "Error parsing URL";

#[derive(Deserialize)]
pub struct ParseRequest {
    pub url: Url,
}

#[derive(Serialize)]
pub struct ParseResponse {
    pub cards: Vec<Card>,
}

/// Break the content behind a URL into exercise cards.
///
/// The URL is never fetched; the model is only told where the content lives
/// and what platform it is on.
pub async fn parse_url(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(req): ApiJson<ParseRequest>,
) -> Result<Json<ParseResponse>, ApiError> {
    if !matches!(req.url.scheme(), "http" | "https") {
        return Err(ApiError::BadRequest(format!(
            "unsupported URL scheme: {}",
            req.url.scheme()
        )));
    }

    let url = req.url.to_string();
    let platform = Platform::detect(&url);
    tracing::info!(url = %url, %platform, user = %user.user_id, "parsing URL");

    let prompt = parse_url_prompt(&url, platform);
    let text = state
        .gateway
        .complete(&prompt)
        .await
        .map_err(ApiError::llm(CONTEXT))?;

    let mut cards: Vec<Card> = extract_items(&text, "cards").map_err(ApiError::llm(CONTEXT))?;
    normalize_cards(&mut cards, &url, platform);

    tracing::info!(url = %url, count = cards.len(), "parsed cards");

    Ok(Json(ParseResponse { cards }))
}
