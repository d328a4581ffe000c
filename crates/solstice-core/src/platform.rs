//! Coarse platform classification of source URLs.
//!
//! URLs are never fetched. The tag only tells the prompt what kind of content
//! the model should expect and is stamped onto cards that lack a source type.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Platform {
    Youtube,
    Instagram,
    Tiktok,
    Twitter,
    Article,
    Web,
}

/// Substring patterns checked in order against the lowercased URL.
/// The first hit wins.
const PATTERNS: &[(&str, Platform)] = &[
    ("youtube.com", Platform::Youtube),
    ("youtu.be", Platform::Youtube),
    ("instagram.com", Platform::Instagram),
    ("tiktok.com", Platform::Tiktok),
    ("twitter.com", Platform::Twitter),
    ("x.com", Platform::Twitter),
    ("medium.com", Platform::Article),
    ("blog.", Platform::Article),
    (".blog", Platform::Article),
    ("article", Platform::Article),
];

impl Platform {
    /// Classify a URL by case-insensitive substring match.
    ///
    /// Total: anything that matches no known pattern is [`Platform::Web`].
    pub fn detect(url: &str) -> Self {
        let url = url.to_lowercase();
        PATTERNS
            .iter()
            .find(|(pattern, _)| url.contains(pattern))
            .map(|(_, platform)| *platform)
            .unwrap_or(Platform::Web)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Twitter => "twitter",
            Platform::Article => "article",
            Platform::Web => "web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
