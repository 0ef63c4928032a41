//! The optional narrative document shown to the GM.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Well-known location of the story document.
pub const STORY_PATH: &str = "data/story.json";

/// One part of the story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPart {
    /// Part identifier.
    pub id: String,
    /// Part title.
    pub title: String,
    /// Player-facing description.
    #[serde(default)]
    pub description: String,
    /// Notes for the GM only.
    #[serde(default)]
    pub gm_notes: String,
}

/// A story: title, summary and ordered parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Title.
    pub title: String,
    /// Document version.
    #[serde(default)]
    pub version: String,
    /// Short synopsis.
    #[serde(default)]
    pub summary: String,
    /// Parts in reading order.
    #[serde(default)]
    pub parts: Vec<StoryPart>,
}

/// Load a story document. Any failure yields `None`.
pub fn load_story(path: &Path) -> Option<Story> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no story document");
            return None;
        }
    };
    match serde_json::from_str(&json) {
        Ok(story) => Some(story),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "story document is malformed");
            None
        }
    }
}
