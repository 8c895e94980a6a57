//! Shared application state

use botwatch_classifiers::PredictionService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::{info, warn};

use crate::analysis::TweetAnalyzer;
use crate::config::BotwatchConfig;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<BotwatchConfig>,

    /// Immutable model pair, or the reason it failed to load
    pub service: Arc<PredictionService>,

    /// Whole-document analysis over the same service
    pub analyzer: TweetAnalyzer,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Load artifacts named by the configuration.
    ///
    /// A load failure leaves the server running in a degraded state where
    /// `/health` reports the reason and classification returns 503.
    pub fn new(config: BotwatchConfig, metrics_handle: PrometheusHandle) -> Self {
        info!(
            vectorizer = %config.model.vectorizer_path.display(),
            classifier = %config.model.classifier_path.display(),
            "Loading model artifacts"
        );
        let service = PredictionService::load(&config.model);
        if let Some(reason) = service.unavailable_reason() {
            warn!(reason, "Starting without a model");
        }

        Self::with_service(config, Arc::new(service), metrics_handle)
    }

    /// Build state around an existing service
    pub fn with_service(
        config: BotwatchConfig,
        service: Arc<PredictionService>,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        let analyzer = TweetAnalyzer::new(Arc::clone(&service), &config.analysis);
        Self {
            config: Arc::new(config),
            service,
            analyzer,
            metrics_handle,
        }
    }
}
