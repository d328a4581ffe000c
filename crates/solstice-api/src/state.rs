use std::sync::Arc;

use solstice_llm::gateway::ChatGateway;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn ChatGateway>,
}
