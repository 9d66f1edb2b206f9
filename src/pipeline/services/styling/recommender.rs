use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::prompt::{StylingPrompt, SYSTEM_PROMPT};
use crate::config::RecommendationSettings;
use crate::error::RecommendationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of a chat-completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn styling(settings: &RecommendationSettings, prompt: StylingPrompt) -> Self {
        Self {
            model: settings.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(prompt.into_string()),
            ],
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    pub fn to_json(&self) -> Result<String, RecommendationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A language model backend able to answer a completion request.
///
/// Implementations return the content of the first choice untouched.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, RecommendationError>;
}

#[async_trait]
impl<R> Recommender for std::sync::Arc<R>
where
    R: Recommender + ?Sized,
{
    async fn complete(&self, request: &CompletionRequest) -> Result<String, RecommendationError> {
        (**self).complete(request).await
    }
}
