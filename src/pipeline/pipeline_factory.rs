use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimit;
use tower::timeout::Timeout;
use tower::ServiceBuilder;

use crate::config::{RecommendationSettings, ServiceSettings};
use crate::error::AppError;
use crate::pipeline::services::image::{ColorClassificationService, ColorClassifier};
use crate::pipeline::services::orchestration::{InstrumentLayer, Instrumented};
use crate::pipeline::services::styling::{Recommender, StylingService};

/// The full analysis stack. Errors are boxed by the timeout layer.
pub type AnalysisService = Instrumented<ConcurrencyLimit<Timeout<ColorClassificationService>>>;

pub fn build_analysis_service(settings: &ServiceSettings) -> Result<AnalysisService, AppError> {
    build_analysis_service_with(settings, Arc::new(ColorClassifier::new()))
}

pub fn build_analysis_service_with(
    settings: &ServiceSettings,
    classifier: Arc<ColorClassifier>,
) -> Result<AnalysisService, AppError> {
    settings.validate()?;

    Ok(ServiceBuilder::new()
        .layer(InstrumentLayer::new("color_analysis"))
        .concurrency_limit(settings.concurrency_limit)
        .timeout(Duration::from_millis(settings.timeout_ms))
        .service(ColorClassificationService::new(
            classifier,
            settings.concurrency_limit,
        )))
}

pub fn build_styling_service<R: Recommender>(
    settings: RecommendationSettings,
    recommender: R,
) -> Result<Instrumented<StylingService<R>>, AppError> {
    settings.validate()?;
    Ok(ServiceBuilder::new()
        .layer(InstrumentLayer::new("styling"))
        .service(StylingService::new(settings, recommender)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::pipeline::types::{
        AnalyzeRequest, ClassificationResult, SkinTone, StylingRequest, Undertone,
    };
    use crate::test_support::{large_skin_png, solid_png};
    use std::time::Duration;
    use tower::timeout::error::Elapsed;
    use tower::ServiceExt;

    fn free_classifier_slots(service: &AnalysisService) -> usize {
        service.get_ref().get_ref().get_ref().available_permits()
    }

    #[tokio::test]
    async fn analysis_stack_classifies() {
        let service = build_analysis_service(&ServiceSettings::default()).unwrap();
        let result = service
            .oneshot(AnalyzeRequest::new(solid_png([220, 180, 140])))
            .await
            .unwrap();
        assert_eq!(result.skin_tone, SkinTone::Fair);
    }

    #[tokio::test]
    async fn analysis_errors_survive_boxing() {
        let service = build_analysis_service(&ServiceSettings::default()).unwrap();
        let err = service
            .oneshot(AnalyzeRequest::new(Vec::new()))
            .await
            .unwrap_err();

        let app = err.downcast_ref::<AppError>().unwrap();
        assert!(matches!(
            app,
            AppError::Analysis(AnalysisError::InvalidImage { .. })
        ));
    }

    #[tokio::test]
    async fn timed_out_analysis_keeps_its_slot_until_done() {
        let settings = ServiceSettings {
            concurrency_limit: 1,
            timeout_ms: 1,
        };
        let service = build_analysis_service(&settings).unwrap();
        let bytes = large_skin_png();

        for _ in 0..3 {
            let err = service
                .clone()
                .oneshot(AnalyzeRequest::new(bytes.clone()))
                .await
                .unwrap_err();
            assert!(err.is::<Elapsed>());
        }

        // The first decode is still running on the blocking pool; the two
        // later requests gave up while waiting and never started.
        assert_eq!(free_classifier_slots(&service), 0);

        let mut waited = 0;
        while free_classifier_slots(&service) == 0 {
            assert!(waited < 600, "analysis never released its slot");
            tokio::time::sleep(Duration::from_millis(50)).await;
            waited += 1;
        }
        assert_eq!(free_classifier_slots(&service), 1);
    }

    #[tokio::test]
    async fn styling_service_uses_recommendation_settings() {
        struct EchoModel;

        #[async_trait::async_trait]
        impl Recommender for EchoModel {
            async fn complete(
                &self,
                request: &crate::pipeline::services::styling::CompletionRequest,
            ) -> Result<String, crate::error::RecommendationError> {
                Ok(format!("{{\"model\": \"{}\"}}", request.model))
            }
        }

        let settings = RecommendationSettings {
            model: "stylist-small".to_string(),
            ..RecommendationSettings::default()
        };
        let service = build_styling_service(settings, EchoModel).unwrap();
        let request = StylingRequest::from_classification(&ClassificationResult::new(
            SkinTone::Olive,
            Undertone::Neutral,
            [150, 120, 110],
        ));

        let reply = service.oneshot(request).await.unwrap();
        assert_eq!(reply, "{\"model\": \"stylist-small\"}");
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = ServiceSettings {
            concurrency_limit: 0,
            ..ServiceSettings::default()
        };
        assert!(matches!(
            build_analysis_service(&settings),
            Err(AppError::InvalidSettings(_))
        ));

        let settings = RecommendationSettings {
            outfit_count: 0,
            ..RecommendationSettings::default()
        };
        struct Unused;
        #[async_trait::async_trait]
        impl Recommender for Unused {
            async fn complete(
                &self,
                _: &crate::pipeline::services::styling::CompletionRequest,
            ) -> Result<String, crate::error::RecommendationError> {
                Ok(String::new())
            }
        }
        assert!(build_styling_service(settings, Unused).is_err());
    }
}
