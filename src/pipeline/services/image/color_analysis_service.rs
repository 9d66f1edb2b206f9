use futures::future::BoxFuture;
use image::RgbImage;
use std::{
    sync::Arc,
    task::{Context, Poll},
};
use tokio::sync::Semaphore;
use tower::Service;
use tracing::debug;

use super::hsv::{HsvRange, SKIN_RANGE};
use super::skin_mask::{AverageColor, SkinMask};
use crate::config::ServiceSettings;
use crate::error::{AnalysisError, AppError};
use crate::pipeline::types::{AnalyzeRequest, ClassificationResult, SkinTone, Undertone};

/// Infers skin tone, undertone and seasonal palette from a photo.
///
/// The pipeline is decode, HSV skin mask, mean colour of the masked pixels,
/// then three table lookups. It holds no mutable state, so one instance can
/// be shared across any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct ColorClassifier {
    skin_range: HsvRange,
}

impl Default for ColorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorClassifier {
    pub fn new() -> Self {
        Self {
            skin_range: SKIN_RANGE,
        }
    }

    pub fn analyze(&self, image_bytes: &[u8]) -> Result<ClassificationResult, AnalysisError> {
        let image = self.decode(image_bytes)?;
        self.classify_image(&image)
    }

    pub fn classify_image(&self, image: &RgbImage) -> Result<ClassificationResult, AnalysisError> {
        let mask = SkinMask::from_image(image, &self.skin_range);
        let average =
            AverageColor::from_masked(image, &mask).ok_or(AnalysisError::NoSkinDetected)?;

        let skin_tone = SkinTone::from_luminance(average.luminance());
        let undertone = Undertone::from_red_blue(average.r, average.b);

        debug!(
            width = image.width(),
            height = image.height(),
            skin_pixels = mask.count(),
            %skin_tone,
            %undertone,
            "Classified skin colour"
        );

        Ok(ClassificationResult::new(
            skin_tone,
            undertone,
            average.to_rgb8(),
        ))
    }

    fn decode(&self, image_bytes: &[u8]) -> Result<RgbImage, AnalysisError> {
        if image_bytes.is_empty() {
            return Err(AnalysisError::invalid_image("empty buffer"));
        }

        let image = image::load_from_memory(image_bytes)
            .map_err(|e| AnalysisError::invalid_image(e.to_string()))?
            .to_rgb8();

        if image.width() == 0 || image.height() == 0 {
            return Err(AnalysisError::invalid_image("image has no pixels"));
        }

        Ok(image)
    }
}

/// Runs the classifier on tokio's blocking pool so decoding large uploads
/// does not stall the executor.
///
/// At most `max_in_flight` analyses run at once. The permit moves into the
/// blocking task, so a caller that stops waiting (timeout, dropped future)
/// does not free a slot until the decode and scan have actually finished.
#[derive(Debug, Clone)]
pub struct ColorClassificationService {
    classifier: Arc<ColorClassifier>,
    permits: Arc<Semaphore>,
}

impl Default for ColorClassificationService {
    fn default() -> Self {
        Self::new(
            Arc::new(ColorClassifier::new()),
            ServiceSettings::default().concurrency_limit,
        )
    }
}

impl ColorClassificationService {
    pub fn new(classifier: Arc<ColorClassifier>, max_in_flight: usize) -> Self {
        Self {
            classifier,
            permits: Arc::new(Semaphore::new(max_in_flight)),
        }
    }

    /// Slots not currently held by a running analysis.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}

impl Service<AnalyzeRequest> for ColorClassificationService {
    type Response = ClassificationResult;
    type Error = AppError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), AppError>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: AnalyzeRequest) -> Self::Future {
        let classifier = self.classifier.clone();
        let permits = self.permits.clone();

        Box::pin(async move {
            let AnalyzeRequest { request_id, image } = request;
            let permit = permits
                .acquire_owned()
                .await
                .map_err(|e| AppError::Task(e.to_string()))?;
            debug!(%request_id, bytes = image.len(), "Analyzing upload");

            let result = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                classifier.analyze(&image)
            })
            .await
            .map_err(|e| AppError::Task(e.to_string()))??;

            Ok(result)
        })
    }
}
