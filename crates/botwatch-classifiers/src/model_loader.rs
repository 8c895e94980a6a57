//! Fitted artifact formats and loading
//!
//! Both artifacts are JSON documents exported from the training side. The
//! vectorizer carries the n-gram vocabulary, the booster carries the tree
//! dump. Loading happens once at startup.

use crate::booster::GradientBoostedTrees;
use crate::config::ModelConfig;
use crate::vectorizer::CharNgramVectorizer;
use botwatch_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Serialized character n-gram vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Only `char` is supported
    #[serde(default = "default_analyzer")]
    pub analyzer: String,

    /// Inclusive n-gram length range
    pub ngram_range: (usize, usize),

    /// Lowercase text before counting
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// n-gram to feature index
    pub vocabulary: HashMap<String, usize>,
}

/// Serialized gradient-boosted tree ensemble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoosterArtifact {
    /// Number of classes the model was trained on
    pub num_class: usize,

    /// Feature dimension the model was trained on
    pub num_features: usize,

    /// Initial margin added to every class
    #[serde(default = "default_base_score")]
    pub base_score: f32,

    /// Treat zero-valued features as missing (sparse training input)
    #[serde(default = "default_true")]
    pub missing_zero: bool,

    /// Trees in boosting order
    pub trees: Vec<TreeArtifact>,
}

/// Serialized regression tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArtifact {
    /// Class whose margin this tree contributes to
    pub class: usize,

    /// Nodes, root has id 0
    pub nodes: Vec<NodeArtifact>,
}

/// Serialized tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeArtifact {
    /// Go to `yes` when `x[split] < threshold`, `no` otherwise, `missing`
    /// (default `yes`) when the feature is absent
    Split {
        id: usize,
        split: usize,
        threshold: f32,
        yes: usize,
        no: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        missing: Option<usize>,
    },

    /// Terminal node
    Leaf { id: usize, leaf: f32 },
}

impl NodeArtifact {
    /// Node id within its tree
    pub fn id(&self) -> usize {
        match self {
            Self::Split { id, .. } | Self::Leaf { id, .. } => *id,
        }
    }
}

fn default_analyzer() -> String {
    "char".to_string()
}

fn default_base_score() -> f32 {
    0.5
}

fn default_true() -> bool {
    true
}

/// Descriptive metadata about a loaded model pair
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    /// Vocabulary size
    pub vocabulary_size: usize,

    /// Inclusive n-gram length range
    pub ngram_range: (usize, usize),

    /// Total trees in the ensemble
    pub num_trees: usize,

    /// Vectorizer artifact path
    pub vectorizer_path: Option<PathBuf>,

    /// Classifier artifact path
    pub classifier_path: Option<PathBuf>,
}

/// Vectorizer and classifier loaded together
pub struct LoadedModel {
    vectorizer: Arc<CharNgramVectorizer>,
    classifier: Arc<GradientBoostedTrees>,
    metadata: ModelMetadata,
}

impl LoadedModel {
    /// Load both artifacts named by the configuration
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let vectorizer = load_vectorizer(&config.vectorizer_path)?;
        let classifier = load_classifier(&config.classifier_path)?;

        let mut model = Self::from_parts(vectorizer, classifier);
        model.metadata.vectorizer_path = Some(config.vectorizer_path.clone());
        model.metadata.classifier_path = Some(config.classifier_path.clone());

        info!(
            vocabulary_size = model.metadata.vocabulary_size,
            num_trees = model.metadata.num_trees,
            "Loaded model artifacts"
        );
        Ok(model)
    }

    /// Pair an already-built vectorizer and classifier
    pub fn from_parts(vectorizer: CharNgramVectorizer, classifier: GradientBoostedTrees) -> Self {
        let metadata = ModelMetadata {
            vocabulary_size: crate::FeatureExtractor::dimension(&vectorizer),
            ngram_range: vectorizer.ngram_range(),
            num_trees: classifier.num_trees(),
            vectorizer_path: None,
            classifier_path: None,
        };
        Self {
            vectorizer: Arc::new(vectorizer),
            classifier: Arc::new(classifier),
            metadata,
        }
    }

    /// Get the vectorizer
    pub fn vectorizer(&self) -> &Arc<CharNgramVectorizer> {
        &self.vectorizer
    }

    /// Get the classifier
    pub fn classifier(&self) -> &Arc<GradientBoostedTrees> {
        &self.classifier
    }

    /// Get model metadata
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

/// Parse a vectorizer artifact from JSON text
pub fn vectorizer_from_json(json: &str) -> Result<CharNgramVectorizer> {
    let artifact: VectorizerArtifact = serde_json::from_str(json)?;
    CharNgramVectorizer::from_artifact(artifact)
}

/// Parse a classifier artifact from JSON text
pub fn classifier_from_json(json: &str) -> Result<GradientBoostedTrees> {
    let artifact: BoosterArtifact = serde_json::from_str(json)?;
    GradientBoostedTrees::from_artifact(artifact)
}

/// Load a vectorizer artifact from disk
pub fn load_vectorizer(path: impl AsRef<Path>) -> Result<CharNgramVectorizer> {
    let path = path.as_ref();
    let content = read_artifact(path, "vectorizer")?;
    vectorizer_from_json(&content)
        .map_err(|e| with_path(e, path))
}

/// Load a classifier artifact from disk
pub fn load_classifier(path: impl AsRef<Path>) -> Result<GradientBoostedTrees> {
    let path = path.as_ref();
    let content = read_artifact(path, "classifier")?;
    classifier_from_json(&content)
        .map_err(|e| with_path(e, path))
}

fn read_artifact(path: &Path, kind: &str) -> Result<String> {
    if !path.exists() {
        return Err(Error::config(format!(
            "{kind} artifact not found: {}",
            path.display()
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn with_path(err: Error, path: &Path) -> Error {
    match err {
        Error::Serialization(e) => {
            Error::artifact(format!("failed to parse {}: {e}", path.display()))
        }
        other => other,
    }
}
