mod analyze_request;
mod classification;
mod styling_request;

pub use analyze_request::AnalyzeRequest;
pub use classification::{ClassificationResult, Season, SkinTone, Undertone};
pub use styling_request::StylingRequest;
