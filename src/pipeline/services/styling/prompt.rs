use crate::pipeline::types::StylingRequest;

pub const SYSTEM_PROMPT: &str = "You are a helpful fashion assistant that outputs JSON.";

const OUTFIT_FIELDS: [&str; 9] = [
    "Outfit Name",
    "Top (specific item, color, style)",
    "Bottom (specific item, color, style)",
    "Shoes",
    "Accessories",
    "Fabric Type",
    "Color Palette (brief description)",
    "Style Explanation (why this works for their features)",
    "Shopping Search Terms (for Amazon/Zara/Myntra)",
];

const RESPONSE_SCHEMA: &str = r#"{
  "Style DNA": "3-word tagline",
  "Top 3 Colors to wear": ["Color 1", "Color 2", "Color 3"],
  "1 Color to avoid": "Color",
  "outfit_recommendations": [
    {
      "Outfit Name": "...",
      "Top": "...",
      "Bottom": "...",
      "Shoes": "...",
      "Accessories": "...",
      "Fabric Type": "...",
      "Color Palette": "...",
      "Style Explanation": "...",
      "Shopping Search Terms": "..."
    }
  ],
  "Styling Tip": "..."
}"#;

/// User message asking the model for outfit recommendations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylingPrompt(String);

impl StylingPrompt {
    pub fn render(request: &StylingRequest, outfit_count: u8) -> Self {
        let fields = OUTFIT_FIELDS
            .iter()
            .enumerate()
            .map(|(i, field)| format!("{}. {}", i + 1, field))
            .collect::<Vec<_>>()
            .join("\n");

        Self(format!(
            "You are a professional personal fashion stylist.\n\
             Based on the following user characteristics, generate {outfit_count} distinct outfit recommendations.\n\
             \n\
             User Attributes:\n\
             - Skin Tone: {skin_tone}\n\
             - Season: {season}\n\
             - Undertone: {undertone}\n\
             - Occasion: {occasion}\n\
             - Style Aesthetic: {aesthetic}\n\
             - Extra Preferences: {preferences}\n\
             \n\
             For each outfit, provide:\n\
             {fields}\n\
             \n\
             Return the response as a structured JSON object with EXACTLY these keys:\n\
             {RESPONSE_SCHEMA}\n",
            skin_tone = request.skin_tone,
            season = request.season,
            undertone = request.undertone,
            occasion = request.occasion,
            aesthetic = request.aesthetic,
            preferences = request.preferences,
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::{ClassificationResult, SkinTone, Undertone};

    fn request() -> StylingRequest {
        let result = ClassificationResult::new(SkinTone::Olive, Undertone::Cool, [130, 110, 150]);
        StylingRequest::from_classification(&result)
            .with_occasion("Gallery opening")
            .with_aesthetic("Dark academia")
            .with_preferences("No heels")
    }

    #[test]
    fn includes_every_attribute() {
        let prompt = StylingPrompt::render(&request(), 4);
        let text = prompt.as_str();

        assert!(text.contains("- Skin Tone: Olive"));
        assert!(text.contains("- Season: Winter"));
        assert!(text.contains("- Undertone: Cool"));
        assert!(text.contains("- Occasion: Gallery opening"));
        assert!(text.contains("- Style Aesthetic: Dark academia"));
        assert!(text.contains("- Extra Preferences: No heels"));
    }

    #[test]
    fn asks_for_configured_outfit_count() {
        let text = StylingPrompt::render(&request(), 2).into_string();
        assert!(text.contains("generate 2 distinct outfit recommendations"));
        assert!(text.contains("9. Shopping Search Terms"));
    }

    #[test]
    fn embeds_response_schema() {
        let text = StylingPrompt::render(&request(), 4).into_string();
        for key in [
            "\"Style DNA\"",
            "\"Top 3 Colors to wear\"",
            "\"1 Color to avoid\"",
            "\"outfit_recommendations\"",
            "\"Styling Tip\"",
        ] {
            assert!(text.contains(key), "missing {key}");
        }
    }

    #[test]
    fn response_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(RESPONSE_SCHEMA).unwrap();
        assert!(schema["outfit_recommendations"].is_array());
    }
}
