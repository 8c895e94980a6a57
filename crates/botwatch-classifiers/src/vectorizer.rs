//! Character n-gram count vectorizer
//!
//! Reproduces the fitted `analyzer = "char"` count vectorizer: optional
//! lowercasing, collapsing of whitespace runs, then counting every window of
//! `min_n..=max_n` characters that appears in the vocabulary.

use crate::classifier::FeatureExtractor;
use crate::model_loader::VectorizerArtifact;
use botwatch_core::{Error, FeatureVector, Result};
use regex::Regex;
use std::collections::HashMap;

/// Fitted character n-gram vectorizer
#[derive(Debug, Clone)]
pub struct CharNgramVectorizer {
    vocabulary: HashMap<String, usize>,
    min_n: usize,
    max_n: usize,
    lowercase: bool,
    whitespace: Regex,
}

impl CharNgramVectorizer {
    /// Create a vectorizer from a fitted vocabulary.
    ///
    /// Indices must cover `0..vocabulary.len()` exactly once.
    pub fn new(
        vocabulary: HashMap<String, usize>,
        ngram_range: (usize, usize),
        lowercase: bool,
    ) -> Result<Self> {
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::artifact(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let mut seen = vec![false; vocabulary.len()];
        for (ngram, &index) in &vocabulary {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(Error::artifact(format!(
                        "vocabulary index {index} assigned twice (at '{ngram}')"
                    )))
                }
                None => {
                    return Err(Error::artifact(format!(
                        "vocabulary index {index} for '{ngram}' exceeds vocabulary size {}",
                        vocabulary.len()
                    )))
                }
            }
        }

        let whitespace = Regex::new(r"\s\s+")
            .map_err(|e| Error::internal(format!("Failed to build whitespace pattern: {e}")))?;

        Ok(Self {
            vocabulary,
            min_n,
            max_n,
            lowercase,
            whitespace,
        })
    }

    /// Build from a deserialized artifact
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        if artifact.analyzer != "char" {
            return Err(Error::artifact(format!(
                "unsupported analyzer '{}', expected 'char'",
                artifact.analyzer
            )));
        }
        if artifact.vocabulary.is_empty() {
            return Err(Error::extractor_unavailable("vectorizer vocabulary is empty"));
        }
        Self::new(artifact.vocabulary, artifact.ngram_range, artifact.lowercase)
    }

    /// Inclusive n-gram length range
    pub fn ngram_range(&self) -> (usize, usize) {
        (self.min_n, self.max_n)
    }

    fn preprocess(&self, text: &str) -> String {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        self.whitespace.replace_all(&text, " ").into_owned()
    }
}

impl FeatureExtractor for CharNgramVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector> {
        if self.vocabulary.is_empty() {
            return Err(Error::extractor_unavailable("no vocabulary loaded"));
        }

        let chars: Vec<char> = self.preprocess(text).chars().collect();
        let mut hits = Vec::new();
        let mut window = String::with_capacity(self.max_n * 4);

        for n in self.min_n..=self.max_n.min(chars.len()) {
            for gram in chars.windows(n) {
                window.clear();
                window.extend(gram);
                if let Some(&index) = self.vocabulary.get(window.as_str()) {
                    hits.push((index, 1.0));
                }
            }
        }

        FeatureVector::from_entries(self.vocabulary.len(), hits)
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &str {
        "char-ngram"
    }
}
