//! solstice-llm
//!
//! Chat-completion gateway, prompt construction and coercion of free-text
//! model output into typed results.

pub mod coerce;
pub mod error;
pub mod gateway;
pub mod prompts;
