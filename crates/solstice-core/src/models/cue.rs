use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Categories the cue prompt asks the model to choose from.
pub const CUE_TYPES: [&str; 6] = ["form", "breathing", "tempo", "focus", "intensity", "general"];

/// One instructional tip for a [`super::card::Card`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cue {
    #[serde(default)]
    pub id: Option<String>,
    pub label: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    /// Offset into the source, in seconds.
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
