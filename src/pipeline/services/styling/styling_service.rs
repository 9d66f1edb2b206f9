use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;
use tracing::debug;

use super::prompt::StylingPrompt;
use super::recommender::{CompletionRequest, Recommender};
use crate::config::RecommendationSettings;
use crate::error::{AppError, RecommendationError};
use crate::pipeline::types::StylingRequest;

/// Turns a classification plus preferences into outfit recommendations.
///
/// The model's reply is returned verbatim; it is expected to be JSON but is
/// not parsed here.
pub struct StylingService<R> {
    settings: Arc<RecommendationSettings>,
    recommender: Arc<R>,
}

impl<R> Clone for StylingService<R> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            recommender: self.recommender.clone(),
        }
    }
}

impl<R: Recommender> StylingService<R> {
    pub fn new(settings: RecommendationSettings, recommender: R) -> Self {
        Self {
            settings: Arc::new(settings),
            recommender: Arc::new(recommender),
        }
    }

    pub fn completion_request(&self, request: &StylingRequest) -> CompletionRequest {
        let prompt = StylingPrompt::render(request, self.settings.outfit_count);
        CompletionRequest::styling(&self.settings, prompt)
    }
}

impl<R> Service<StylingRequest> for StylingService<R>
where
    R: Recommender + 'static,
{
    type Response = String;
    type Error = AppError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), AppError>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: StylingRequest) -> Self::Future {
        let completion = self.completion_request(&request);
        let recommender = self.recommender.clone();

        Box::pin(async move {
            debug!(
                season = %request.season,
                occasion = %request.occasion,
                "Requesting outfit recommendations"
            );

            let content = recommender.complete(&completion).await?;
            if content.trim().is_empty() {
                return Err(RecommendationError::EmptyCompletion.into());
            }

            Ok(content)
        })
    }
}
