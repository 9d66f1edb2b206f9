pub mod color_analysis_service;
pub mod hsv;
pub mod skin_mask;

pub use color_analysis_service::{ColorClassificationService, ColorClassifier};
pub use hsv::{Hsv, HsvRange, SKIN_RANGE};
pub use skin_mask::{AverageColor, SkinMask};
