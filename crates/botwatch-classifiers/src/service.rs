//! Prediction service
//!
//! Bundles a feature extractor and a classifier into one immutable object
//! built at startup. A load failure is captured once and every later
//! `classify` call fails fast with [`Error::ModelUnavailable`].

use crate::classifier::{FeatureExtractor, ProbabilisticClassifier};
use crate::config::ModelConfig;
use crate::model_loader::{LoadedModel, ModelMetadata};
use botwatch_core::{Error, PredictionResult, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, trace, warn};

enum ServiceState {
    Ready {
        extractor: Arc<dyn FeatureExtractor>,
        classifier: Arc<dyn ProbabilisticClassifier>,
        metadata: Option<ModelMetadata>,
    },
    Unavailable {
        reason: String,
    },
}

/// Summary of the models behind a ready service
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    /// Feature extractor name
    pub extractor: String,

    /// Classifier name
    pub classifier: String,

    /// Feature dimension produced by the extractor
    pub feature_dimension: usize,

    /// Artifact details, present when built from loaded artifacts
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<ModelMetadata>,
}

/// Text classification entry point
pub struct PredictionService {
    state: ServiceState,
}

impl PredictionService {
    /// Create a ready service from an extractor and a classifier
    pub fn new(
        extractor: Arc<dyn FeatureExtractor>,
        classifier: Arc<dyn ProbabilisticClassifier>,
    ) -> Self {
        if extractor.dimension() != classifier.num_features() {
            warn!(
                extractor_dimension = extractor.dimension(),
                classifier_features = classifier.num_features(),
                "Extractor and classifier disagree on feature dimension; classify calls will fail"
            );
        }

        Self {
            state: ServiceState::Ready {
                extractor,
                classifier,
                metadata: None,
            },
        }
    }

    /// Create a service from a loaded artifact pair
    pub fn from_loaded(model: LoadedModel) -> Self {
        let extractor: Arc<dyn FeatureExtractor> = model.vectorizer().clone();
        let classifier: Arc<dyn ProbabilisticClassifier> = model.classifier().clone();
        let mut service = Self::new(extractor, classifier);
        if let ServiceState::Ready { metadata, .. } = &mut service.state {
            *metadata = Some(model.metadata().clone());
        }
        service
    }

    /// Load artifacts once; a failure is remembered rather than returned
    pub fn load(config: &ModelConfig) -> Self {
        match LoadedModel::load(config) {
            Ok(model) => {
                info!("Prediction service ready");
                Self::from_loaded(model)
            }
            Err(e) => {
                error!(error = %e, "Failed to load model artifacts; prediction service unavailable");
                Self::unavailable(e.to_string())
            }
        }
    }

    /// Create a service that rejects every request
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ServiceState::Unavailable {
                reason: reason.into(),
            },
        }
    }

    /// Whether models are loaded
    pub fn is_ready(&self) -> bool {
        matches!(self.state, ServiceState::Ready { .. })
    }

    /// Why the service is unavailable, if it is
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            ServiceState::Ready { .. } => None,
            ServiceState::Unavailable { reason } => Some(reason),
        }
    }

    /// Describe the loaded models
    pub fn model_info(&self) -> Option<ModelInfo> {
        match &self.state {
            ServiceState::Ready {
                extractor,
                classifier,
                metadata,
            } => Some(ModelInfo {
                extractor: extractor.name().to_string(),
                classifier: classifier.name().to_string(),
                feature_dimension: extractor.dimension(),
                artifacts: metadata.clone(),
            }),
            ServiceState::Unavailable { .. } => None,
        }
    }

    /// Classify one text sample
    pub fn classify(&self, text: &str) -> Result<PredictionResult> {
        let start = Instant::now();

        let result = self.classify_inner(text);
        let latency_us = start.elapsed().as_micros() as u64;

        match &result {
            Ok(prediction) => {
                metrics::histogram!("botwatch_classify_latency_us").record(latency_us as f64);
                metrics::counter!("botwatch_predictions_total", "label" => prediction.label.as_str())
                    .increment(1);
                debug!(
                    label = %prediction.label,
                    confidence = prediction.confidence,
                    latency_us,
                    "Classified text"
                );
            }
            Err(e) => {
                metrics::counter!("botwatch_errors_total", "kind" => e.kind()).increment(1);
                match e {
                    Error::FeatureDimensionMismatch { expected, actual } => error!(
                        expected,
                        actual,
                        "Feature dimension mismatch between vectorizer and classifier artifacts"
                    ),
                    e if e.is_caller_error() => debug!(error = %e, "Rejected classify request"),
                    e => warn!(error = %e, "Classification failed"),
                }
            }
        }

        result
    }

    fn classify_inner(&self, text: &str) -> Result<PredictionResult> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let (extractor, classifier) = match &self.state {
            ServiceState::Ready {
                extractor,
                classifier,
                ..
            } => (extractor, classifier),
            ServiceState::Unavailable { reason } => {
                return Err(Error::model_unavailable(reason.clone()))
            }
        };

        let features = extractor.transform(text)?;
        trace!(dim = features.dim(), nnz = features.nnz(), "Vectorized text");
        let probabilities = classifier.predict_probabilities(&features)?;

        Ok(PredictionResult::from_probabilities(probabilities))
    }
}
