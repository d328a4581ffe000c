//! Instruction prompts for each endpoint.
//!
//! Every prompt states the assistant persona, embeds the caller's data
//! verbatim, shows the exact JSON shape expected back and asks for JSON only.

use solstice_core::models::card::Card;
use solstice_core::models::cue::CUE_TYPES;
use solstice_core::platform::Platform;

const PERSONA: &str = "You are an AI assistant for a wellness app called Solstice.";
const JSON_ONLY: &str = "Only return valid JSON without any additional text.";

/// Prompt asking the model to segment the content at `url` into cards.
pub fn parse_url_prompt(url: &str, platform: Platform) -> String {
    format!(
        r#"{PERSONA} Parse the following {platform} URL into a structured workout routine:

URL: {url}

Break this content into logical segments (cards) that represent distinct exercises or movements.
For each segment, identify:
1. A clear title
2. Approximate start and end times (in seconds)
3. Brief description
4. Number of sets and reps (if applicable)

Return your response as a JSON object with the following structure:
{{
  "cards": [
    {{
      "title": "Exercise Name",
      "description": "Brief description",
      "source_url": "{url}",
      "source_type": "{platform}",
      "startTime": 30,
      "endTime": 60,
      "duration": 30,
      "sets": 3,
      "reps": 10,
      "notes": "Additional notes",
      "createdBy": "agent"
    }}
  ]
}}

{JSON_ONLY}"#
    )
}

/// Prompt asking for 3-5 instructional cues for `card`.
pub fn cue_prompt(card: &Card) -> String {
    let description = card.description.as_deref().unwrap_or("");
    let duration = card.duration.map(|d| d.to_string()).unwrap_or_default();
    let cue_types = CUE_TYPES
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"{PERSONA} Generate instructional cues for the following exercise:

Exercise: {title}
Description: {description}
Duration: {duration} seconds

Generate 3-5 specific, actionable cues that would help someone perform this exercise correctly.
Each cue should focus on form, breathing, tempo, intensity, or other important aspects.

Return your response as a JSON object with the following structure:
{{
  "cues": [
    {{
      "label": "Keep core engaged",
      "instructions": "Maintain tension in your abdominal muscles throughout the movement",
      "type": "form"
    }},
    {{
      "label": "Breathe deeply",
      "instructions": "Inhale on the eccentric phase, exhale on the concentric phase",
      "type": "breathing"
    }}
  ]
}}

Valid cue types: {cue_types}

{JSON_ONLY}"#,
        title = card.title,
    )
}

/// Prompt asking for 3-5 routine recommendations for a user's interests.
pub fn recommend_prompt(user_id: &str, tags: &[String]) -> String {
    let interests = if tags.is_empty() {
        "Not specified".to_string()
    } else {
        tags.join(", ")
    };

    format!(
        r#"{PERSONA} Generate personalized routine recommendations for a user with the following preferences:

User ID: {user_id}
Tags/Interests: {interests}

Generate 3-5 routine recommendations that would appeal to this user.

Return your response as a JSON object with the following structure:
{{
  "routines": [
    {{
      "id": "r-1",
      "title": "Morning Mobility Flow",
      "description": "A gentle routine to improve joint mobility and wake up your body",
      "tags": ["mobility", "morning", "beginner"]
    }},
    {{
      "id": "r-2",
      "title": "Quick Core Blast",
      "description": "An efficient core workout that takes just 10 minutes",
      "tags": ["core", "quick", "intermediate"]
    }}
  ]
}}

{JSON_ONLY}"#
    )
}
