use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Analysis Error: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Recommendation Error: {0}")]
    Recommendation(#[from] RecommendationError),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Background task failed: {0}")]
    Task(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

// Color classification errors. Both are expected outcomes of a bad upload,
// never a reason to take the process down.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid image: {reason}")]
    InvalidImage { reason: String },
    #[error("No skin detected")]
    NoSkinDetected,
}

impl AnalysisError {
    pub fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }

    /// Both kinds can be fixed by the caller uploading a different photo.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidImage { .. } | AnalysisError::NoSkinDetected
        )
    }

    /// Short message suitable for an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::InvalidImage { .. } => "Invalid image",
            AnalysisError::NoSkinDetected => "No skin detected",
        }
    }
}

#[derive(Error, Debug)]
pub enum RecommendationError {
    #[error("Completion API failed: {0}")]
    Upstream(String),
    #[error("Completion API returned an empty message")]
    EmptyCompletion,
    #[error("Failed to serialize completion payload: {0}")]
    Serialization(#[from] serde_json::Error),
}
