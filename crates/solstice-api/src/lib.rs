//! solstice-api
//!
//! HTTP surface of the Solstice agent API: routing, authentication,
//! request logging and error mapping around the LLM pipeline.

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    // All origins, methods and headers are accepted. Tighten before exposing
    // the service beyond the mobile app.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/parse", post(routes::parse::parse_url))
        .route("/cue", post(routes::cue::generate_cues))
        .route("/recommend", post(routes::recommend::recommend_routines))
        .route_layer(axum_mw::from_fn(middleware::auth::require_auth));

    Router::new()
        // Health (no auth)
        .route("/", get(routes::health::health_check))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::request_log::log_request))
        .layer(cors)
        .with_state(state)
}
