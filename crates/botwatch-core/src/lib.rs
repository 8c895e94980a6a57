//! BotWatch Core
//!
//! Core types and utilities shared across BotWatch components.
//!
//! This crate provides:
//! - The fixed authorship label taxonomy
//! - Feature vectors, probability vectors and prediction results
//! - Error types and result handling

pub mod error;
pub mod label;
pub mod types;

pub use error::{Error, Result};
pub use label::{Label, NUM_CLASSES};
pub use types::{FeatureVector, PredictionResult, ProbabilityVector, SUM_TOLERANCE};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::label::{Label, NUM_CLASSES};
    pub use crate::types::{FeatureVector, PredictionResult, ProbabilityVector};
}
