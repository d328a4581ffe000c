use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OpenRouter API key is missing")]
    MissingCredential,

    #[error("HTTP client could not be built: {0}")]
    Client(String),

    #[error("error calling LLM: {0}")]
    Upstream(String),

    #[error("could not interpret model output: {0}")]
    Coercion(String),

    #[error("model output did not conform to expected schema: {0}")]
    SchemaViolation(String),
}
