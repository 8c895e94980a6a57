//! Core types for BotWatch predictions

use crate::label::{Label, NUM_CLASSES};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Allowed deviation of a probability vector's sum from 1.0
pub const SUM_TOLERANCE: f32 = 1e-4;

/// Sparse count vector over a fitted n-gram vocabulary.
///
/// Indices not stored are zero. `dim` is the vocabulary size and is fixed
/// for a given vectorizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    /// Sorted by index, no duplicates, no zero values
    entries: Vec<(usize, f32)>,
}

impl FeatureVector {
    /// Build a vector from `(index, value)` pairs.
    ///
    /// Duplicate indices are summed and zero values dropped.
    pub fn from_entries(
        dim: usize,
        entries: impl IntoIterator<Item = (usize, f32)>,
    ) -> Result<Self> {
        let mut entries: Vec<(usize, f32)> = entries.into_iter().collect();
        if let Some(&(index, _)) = entries.iter().find(|(index, _)| *index >= dim) {
            return Err(Error::internal(format!(
                "feature index {index} out of range for dimension {dim}"
            )));
        }

        entries.sort_by_key(|(index, _)| *index);

        let mut merged: Vec<(usize, f32)> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            match merged.last_mut() {
                Some((last, total)) if *last == index => *total += value,
                _ => merged.push((index, value)),
            }
        }
        merged.retain(|(_, value)| *value != 0.0);

        Ok(Self { dim, entries: merged })
    }

    /// Build a sparse vector from a dense slice
    pub fn from_dense(values: &[f32]) -> Self {
        Self {
            dim: values.len(),
            entries: values
                .iter()
                .enumerate()
                .filter(|(_, v)| **v != 0.0)
                .map(|(i, v)| (i, *v))
                .collect(),
        }
    }

    /// Vocabulary size
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of non-zero features
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Stored value at `index`, `None` when the feature is zero
    pub fn get(&self, index: usize) -> Option<f32> {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .ok()
            .map(|pos| self.entries[pos].1)
    }

    /// Value at `index`, zero when not stored
    pub fn value(&self, index: usize) -> f32 {
        self.get(index).unwrap_or(0.0)
    }

    /// Non-zero entries in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.entries.iter().copied()
    }
}

/// Class probabilities aligned with [`Label`] ordinals.
///
/// Every entry is finite and non-negative and the entries sum to 1 within
/// [`SUM_TOLERANCE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f32; NUM_CLASSES]", into = "[f32; NUM_CLASSES]")]
pub struct ProbabilityVector([f32; NUM_CLASSES]);

impl ProbabilityVector {
    /// Validate and wrap a distribution
    pub fn new(values: [f32; NUM_CLASSES]) -> Result<Self> {
        if let Some(bad) = values.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(Error::InvalidDistribution(format!(
                "probability {bad} is not a finite non-negative number"
            )));
        }

        let sum: f32 = values.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(Error::InvalidDistribution(format!(
                "probabilities sum to {sum}, expected 1.0"
            )));
        }

        Ok(Self(values))
    }

    /// Probability of a single label
    pub fn get(&self, label: Label) -> f32 {
        self.0[label.ordinal()]
    }

    /// Raw values in label order
    pub fn as_array(&self) -> &[f32; NUM_CLASSES] {
        &self.0
    }

    /// Most probable label; the lowest ordinal wins ties
    pub fn argmax(&self) -> Label {
        let mut best = 0;
        for (i, p) in self.0.iter().enumerate().skip(1) {
            if *p > self.0[best] {
                best = i;
            }
        }
        Label::ALL[best]
    }

    /// Highest class probability
    pub fn max(&self) -> f32 {
        self.0[self.argmax().ordinal()]
    }
}

impl TryFrom<[f32; NUM_CLASSES]> for ProbabilityVector {
    type Error = Error;

    fn try_from(values: [f32; NUM_CLASSES]) -> Result<Self> {
        Self::new(values)
    }
}

impl From<ProbabilityVector> for [f32; NUM_CLASSES] {
    fn from(probabilities: ProbabilityVector) -> Self {
        probabilities.0
    }
}

/// Outcome of classifying one text sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Most probable authorship category
    pub label: Label,

    /// Probability of `label` (0.0-1.0)
    pub confidence: f32,

    /// Full distribution in label order
    pub probabilities: ProbabilityVector,
}

impl PredictionResult {
    /// Derive label and confidence from a distribution
    pub fn from_probabilities(probabilities: ProbabilityVector) -> Self {
        Self {
            label: probabilities.argmax(),
            confidence: probabilities.max(),
            probabilities,
        }
    }
}
