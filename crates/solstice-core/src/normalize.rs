//! Post-processing applied to model output before it reaches the app.
//!
//! The only mutations are identifier stamping and, for cards, back-filling
//! the source URL and platform from the originating request.

use uuid::Uuid;

use crate::models::card::Card;
use crate::models::cue::Cue;
use crate::models::routine::RoutineRecommendation;
use crate::platform::Platform;

/// An entity that must carry a non-empty identifier when returned.
pub trait Identified {
    /// Prefix for generated identifiers, e.g. `"card"` yields `card-<uuid>`.
    const KIND: &'static str;

    fn id_mut(&mut self) -> &mut Option<String>;
}

impl Identified for Card {
    const KIND: &'static str = "card";

    fn id_mut(&mut self) -> &mut Option<String> {
        &mut self.id
    }
}

impl Identified for Cue {
    const KIND: &'static str = "cue";

    fn id_mut(&mut self) -> &mut Option<String> {
        &mut self.id
    }
}

impl Identified for RoutineRecommendation {
    const KIND: &'static str = "routine";

    fn id_mut(&mut self) -> &mut Option<String> {
        &mut self.id
    }
}

/// Generate a fresh identifier namespaced by entity kind.
pub fn generate_id(kind: &str) -> String {
    format!("{kind}-{}", Uuid::new_v4())
}

/// Assign a generated identifier to every item whose id is absent or empty.
///
/// Returns the number of identifiers generated.
pub fn stamp_ids<T: Identified>(items: &mut [T]) -> usize {
    let mut stamped = 0;
    for item in items.iter_mut() {
        let id = item.id_mut();
        if is_blank(id) {
            *id = Some(generate_id(T::KIND));
            stamped += 1;
        }
    }
    stamped
}

/// Normalize cards parsed from `source_url`.
///
/// Cards without a source URL or source type inherit them from the request;
/// cards without an id get a `card-` identifier.
pub fn normalize_cards(cards: &mut [Card], source_url: &str, platform: Platform) {
    for card in cards.iter_mut() {
        if is_blank(&card.source_url) {
            card.source_url = Some(source_url.to_string());
        }
        if is_blank(&card.source_type) {
            card.source_type = Some(platform.as_str().to_string());
        }
    }
    stamp_ids(cards);
}

pub fn normalize_cues(cues: &mut [Cue]) {
    stamp_ids(cues);
}

pub fn normalize_routines(routines: &mut [RoutineRecommendation]) {
    stamp_ids(routines);
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}
