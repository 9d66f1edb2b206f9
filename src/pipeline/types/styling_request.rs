use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::pipeline::types::{ClassificationResult, Season, SkinTone, Undertone};

const NOT_SPECIFIED: &str = "Not specified";

fn not_specified() -> String {
    NOT_SPECIFIED.to_string()
}

/// Classification plus the user's wardrobe preferences.
///
/// Unknown keys are preserved in `extra`, in the order they were received,
/// so callers may attach their own fields without breaking deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylingRequest {
    pub skin_tone: SkinTone,
    pub undertone: Undertone,
    pub season: Season,
    #[serde(default = "not_specified")]
    pub occasion: String,
    #[serde(default = "not_specified")]
    pub aesthetic: String,
    #[serde(default = "not_specified")]
    pub preferences: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl StylingRequest {
    pub fn from_classification(result: &ClassificationResult) -> Self {
        Self {
            skin_tone: result.skin_tone,
            undertone: result.undertone,
            season: result.season,
            occasion: not_specified(),
            aesthetic: not_specified(),
            preferences: not_specified(),
            extra: IndexMap::new(),
        }
    }

    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = occasion.into();
        self
    }

    pub fn with_aesthetic(mut self, aesthetic: impl Into<String>) -> Self {
        self.aesthetic = aesthetic.into();
        self
    }

    pub fn with_preferences(mut self, preferences: impl Into<String>) -> Self {
        self.preferences = preferences.into();
        self
    }
}
