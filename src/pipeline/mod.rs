pub mod pipeline_factory;
pub mod services;
pub mod types;

pub use pipeline_factory::{
    build_analysis_service, build_analysis_service_with, build_styling_service,
    AnalysisService,
};
pub use types::{AnalyzeRequest, ClassificationResult, Season, SkinTone, StylingRequest, Undertone};
