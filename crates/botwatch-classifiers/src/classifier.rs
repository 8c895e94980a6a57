//! Extractor and classifier traits

use botwatch_core::{FeatureVector, ProbabilityVector, Result};

/// Turns raw text into a fixed-dimension feature vector
pub trait FeatureExtractor: Send + Sync {
    /// Vectorize `text` against the fitted vocabulary
    fn transform(&self, text: &str) -> Result<FeatureVector>;

    /// Size of the fitted vocabulary
    fn dimension(&self) -> usize;

    /// Get the extractor name
    fn name(&self) -> &str;
}

/// Maps a feature vector to a distribution over the fixed label set
pub trait ProbabilisticClassifier: Send + Sync {
    /// Class probabilities in label order
    fn predict_probabilities(&self, features: &FeatureVector) -> Result<ProbabilityVector>;

    /// Feature dimension the model was fitted on
    fn num_features(&self) -> usize;

    /// Get the classifier name
    fn name(&self) -> &str;
}
