use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One exercise or segment derived from a source (video, post, article).
///
/// Cards arrive either from the model's parse output or from the app when it
/// asks for cues. Nothing here is persisted; `id`, `source_url` and
/// `source_type` are optional on the wire and filled in by
/// [`crate::normalize::normalize_cards`] before a card leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Card {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,

    // Timing window, in seconds from the start of the source.
    #[serde(default, rename = "startTime")]
    pub start_time: Option<f64>,
    #[serde(default, rename = "endTime")]
    pub end_time: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,

    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Free-form cue objects attached by the app; passed through untouched.
    #[serde(default)]
    pub cues: Option<Vec<serde_json::Value>>,
    #[serde(default = "default_created_by", rename = "createdBy")]
    pub created_by: String,
}

fn default_created_by() -> String {
    "agent".to_string()
}
