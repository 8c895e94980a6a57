//! Configuration for model artifact loading

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default vectorizer artifact file name
pub const VECTORIZER_FILE: &str = "vectorizer.json";

/// Default classifier artifact file name
pub const CLASSIFIER_FILE: &str = "best_model_xgb.json";

/// Where to find the fitted vectorizer and classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Vectorizer artifact (vocabulary and n-gram settings)
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,

    /// Classifier artifact (tree ensemble)
    #[serde(default = "default_classifier_path")]
    pub classifier_path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::from_dir(default_models_dir())
    }
}

impl ModelConfig {
    /// Create a configuration from explicit artifact paths
    pub fn new(vectorizer_path: impl Into<PathBuf>, classifier_path: impl Into<PathBuf>) -> Self {
        Self {
            vectorizer_path: vectorizer_path.into(),
            classifier_path: classifier_path.into(),
        }
    }

    /// Use the default artifact file names inside `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(VECTORIZER_FILE), dir.join(CLASSIFIER_FILE))
    }
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("./models")
}

fn default_vectorizer_path() -> PathBuf {
    default_models_dir().join(VECTORIZER_FILE)
}

fn default_classifier_path() -> PathBuf {
    default_models_dir().join(CLASSIFIER_FILE)
}
