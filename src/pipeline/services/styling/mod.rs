pub mod prompt;
pub mod recommender;
pub mod styling_service;

pub use prompt::StylingPrompt;
pub use recommender::{ChatMessage, CompletionRequest, Recommender, ResponseFormat};
pub use styling_service::StylingService;
