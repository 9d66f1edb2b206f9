//! Skin-tone, undertone and seasonal colour analysis from photos, plus
//! LLM-backed outfit recommendations built on the result.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;

#[cfg(test)]
mod test_support;

pub use config::Settings;
pub use error::{AnalysisError, AppError, RecommendationError};
pub use pipeline::services::{ColorClassifier, Recommender};
pub use pipeline::types::{ClassificationResult, Season, SkinTone, StylingRequest, Undertone};
