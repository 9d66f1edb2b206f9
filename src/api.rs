//! Transport-agnostic request handlers.
//!
//! Each handler turns a service result into a status code and a JSON body.
//! This is the only place where analysis and recommendation errors are
//! given an external representation.

use serde::Serialize;
use std::error::Error;
use tower::timeout::error::Elapsed;
use tower::{BoxError, Service, ServiceExt};
use tracing::{error, warn};

use crate::error::{AnalysisError, AppError};
use crate::pipeline::types::{AnalyzeRequest, ClassificationResult, StylingRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self { status, body },
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                Self::error(500, "Internal server error")
            }
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn from_app_error(err: &AppError) -> Self {
        match err {
            AppError::Analysis(e @ AnalysisError::InvalidImage { .. }) => {
                Self::error(400, e.user_message())
            }
            AppError::Analysis(e @ AnalysisError::NoSkinDetected) => {
                Self::error(422, e.user_message())
            }
            AppError::BadRequest(message) => Self::error(400, message),
            AppError::Recommendation(e) => Self::error(502, &e.to_string()),
            other => {
                error!("Unhandled error: {}", other);
                Self::error(500, "Internal server error")
            }
        }
    }

    fn from_boxed_error(err: &(dyn Error + Send + Sync + 'static)) -> Self {
        if let Some(app) = err.downcast_ref::<AppError>() {
            Self::from_app_error(app)
        } else if err.is::<Elapsed>() {
            warn!("Request timed out");
            Self::error(504, "Request timed out")
        } else {
            error!("Unhandled service error: {}", err);
            Self::error(500, "Internal server error")
        }
    }
}

/// Run an upload through the analysis service.
///
/// A missing or empty upload is rejected before the service is called.
pub async fn classify<S>(
    service: &mut S,
    image: Option<Vec<u8>>,
) -> Result<ClassificationResult, ApiResponse>
where
    S: Service<AnalyzeRequest, Response = ClassificationResult, Error = BoxError>,
{
    let image = match image {
        Some(image) if !image.is_empty() => image,
        _ => return Err(ApiResponse::error(400, "No image uploaded")),
    };

    let result = match service.ready().await {
        Ok(service) => service.call(AnalyzeRequest::new(image)).await,
        Err(e) => Err(e),
    };

    result.map_err(|e| ApiResponse::from_boxed_error(&*e))
}

/// Handler for a photo upload.
pub async fn analyze<S>(service: &mut S, image: Option<Vec<u8>>) -> ApiResponse
where
    S: Service<AnalyzeRequest, Response = ClassificationResult, Error = BoxError>,
{
    match classify(service, image).await {
        Ok(result) => ApiResponse::json(200, &result),
        Err(response) => response,
    }
}

/// Handler for a recommendation request with a JSON body.
///
/// On success the body is the model's text exactly as it was returned.
pub async fn style<S>(service: &mut S, body: &[u8]) -> ApiResponse
where
    S: Service<StylingRequest, Response = String, Error = AppError>,
{
    let request: StylingRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            return ApiResponse::from_app_error(&AppError::BadRequest(format!(
                "Invalid request body: {e}"
            )))
        }
    };

    let result = match service.ready().await {
        Ok(service) => service.call(request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(text) => ApiResponse {
            status: 200,
            body: text,
        },
        Err(e) => ApiResponse::from_app_error(&e),
    }
}
