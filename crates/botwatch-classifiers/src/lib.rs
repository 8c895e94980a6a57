//! BotWatch Classifiers
//!
//! Authorship classification over character n-gram features.
//!
//! The pipeline has three pieces:
//! - [`CharNgramVectorizer`] turns text into sparse n-gram counts
//! - [`GradientBoostedTrees`] maps counts to a distribution over the five labels
//! - [`PredictionService`] ties them together and derives label and confidence
//!
//! Both models are loaded once from JSON artifacts and shared read-only.

pub mod booster;
pub mod classifier;
pub mod config;
pub mod model_loader;
pub mod service;
pub mod vectorizer;

pub use booster::{softmax, GradientBoostedTrees};
pub use classifier::{FeatureExtractor, ProbabilisticClassifier};
pub use config::ModelConfig;
pub use model_loader::{
    classifier_from_json, load_classifier, load_vectorizer, vectorizer_from_json,
    BoosterArtifact, LoadedModel, ModelMetadata, NodeArtifact, TreeArtifact, VectorizerArtifact,
};
pub use service::{ModelInfo, PredictionService};
pub use vectorizer::CharNgramVectorizer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{FeatureExtractor, ProbabilisticClassifier};
    pub use crate::config::ModelConfig;
    pub use crate::service::PredictionService;
    pub use botwatch_core::prelude::*;
}
