//! solstice-core
//!
//! Pure domain types for the Solstice agent API: cards, cues, routine
//! recommendations, platform classification and response normalization.
//! No network dependency; this is the shared vocabulary of the service.

pub mod models;
pub mod normalize;
pub mod platform;
