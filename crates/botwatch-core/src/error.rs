//! Error types for BotWatch

/// Result type alias using BotWatch's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for BotWatch operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model or vectorizer failed to load at startup.
    ///
    /// Remembered for the lifetime of the process; every classify call
    /// fails with this until the service is rebuilt.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Feature extractor has no fitted vocabulary
    #[error("feature extractor unavailable: {0}")]
    ExtractorUnavailable(String),

    /// Classifier has no fitted trees
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Classify was called with empty or whitespace-only text
    #[error("input text is empty")]
    EmptyInput,

    /// Extractor and classifier disagree on the feature space
    #[error("feature dimension mismatch: classifier expects {expected}, got {actual}")]
    FeatureDimensionMismatch { expected: usize, actual: usize },

    /// Document handed to the tweet extractor is not valid JSON
    #[error("malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// Document is valid so far but nests deeper than the accepted limit
    #[error("JSON document nests deeper than {limit} levels")]
    DocumentTooDeep { limit: usize },

    /// Fitted artifact is structurally invalid
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Classifier output violated the probability invariants
    #[error("invalid probability distribution: {0}")]
    InvalidDistribution(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact deserialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new model-unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create a new extractor-unavailable error
    pub fn extractor_unavailable(msg: impl Into<String>) -> Self {
        Self::ExtractorUnavailable(msg.into())
    }

    /// Create a new classifier-unavailable error
    pub fn classifier_unavailable(msg: impl Into<String>) -> Self {
        Self::ClassifierUnavailable(msg.into())
    }

    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller can fix this by changing the request.
    ///
    /// Everything else points at the loaded artifacts or the process.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::MalformedJson(_) | Self::DocumentTooDeep { .. }
        )
    }

    /// Short machine-readable name, used as a metrics label and in API bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelUnavailable(_) => "model_unavailable",
            Self::ExtractorUnavailable(_) => "extractor_unavailable",
            Self::ClassifierUnavailable(_) => "classifier_unavailable",
            Self::EmptyInput => "empty_input",
            Self::FeatureDimensionMismatch { .. } => "feature_dimension_mismatch",
            Self::MalformedJson(_) => "malformed_json",
            Self::DocumentTooDeep { .. } => "document_too_deep",
            Self::Artifact(_) => "artifact",
            Self::InvalidDistribution(_) => "invalid_distribution",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }
}
