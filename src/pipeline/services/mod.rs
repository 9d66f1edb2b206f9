pub mod image;
pub mod orchestration;
pub mod styling;

pub use image::{ColorClassificationService, ColorClassifier};
pub use orchestration::InstrumentLayer;
pub use styling::{Recommender, StylingService};
