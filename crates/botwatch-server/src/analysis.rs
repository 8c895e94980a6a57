//! Document analysis
//!
//! Parse an uploaded export, pull tweet texts out of it, drop the ones too
//! short to judge, and classify what remains according to a [`SamplePolicy`].

use botwatch_classifiers::PredictionService;
use botwatch_core::{Error, PredictionResult, Result};
use botwatch_extract::{parse_document_bytes, preview, LengthFilter, TweetExtractor, PREVIEW_CHARS};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AnalysisConfig;

/// Which valid tweets of a document get classified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplePolicy {
    /// Only the first valid tweet in discovery order
    #[default]
    FirstValid,
    /// Every valid tweet, independently
    All,
}

/// One classified tweet
#[derive(Debug, Clone, Serialize)]
pub struct TweetPrediction {
    /// Tweet text, truncated for display
    pub text: String,

    /// Classification of the full text
    pub result: PredictionResult,
}

/// Outcome of analyzing one document
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Non-blank texts found anywhere in the document
    pub tweets_found: usize,

    /// Texts long enough to classify
    pub valid_tweets: usize,

    /// Predictions in discovery order
    pub predictions: Vec<TweetPrediction>,
}

/// Extraction and classification over whole documents
#[derive(Clone)]
pub struct TweetAnalyzer {
    service: Arc<PredictionService>,
    extractor: TweetExtractor,
    filter: LengthFilter,
    policy: SamplePolicy,
}

impl TweetAnalyzer {
    pub fn new(service: Arc<PredictionService>, config: &AnalysisConfig) -> Self {
        Self {
            service,
            extractor: TweetExtractor::with_key(config.text_key.clone()),
            filter: LengthFilter::new(config.min_length),
            policy: config.sample_policy,
        }
    }

    /// Policy used when the caller does not pick one
    pub fn default_policy(&self) -> SamplePolicy {
        self.policy
    }

    /// Analyze a raw JSON document.
    ///
    /// A document without usable tweets produces an empty report, not an
    /// error. Under [`SamplePolicy::All`] each tweet is classified on the
    /// blocking pool and the first failure in discovery order is returned.
    pub async fn analyze(&self, document: &[u8], policy: SamplePolicy) -> Result<AnalysisReport> {
        let root = parse_document_bytes(document)?;

        let texts = self.extractor.extract(&root);
        let tweets_found = texts.len();

        let mut valid = self.filter.apply(texts);
        let valid_tweets = valid.len();

        debug!(tweets_found, valid_tweets, policy = ?policy, "Extracted candidate tweets");

        let predictions = match policy {
            SamplePolicy::FirstValid => {
                valid.truncate(1);
                valid
                    .into_iter()
                    .map(|text| predict(&self.service, text))
                    .collect::<Result<Vec<_>>>()?
            }
            SamplePolicy::All => self.predict_all(valid).await?,
        };

        metrics::counter!("botwatch_documents_analyzed_total").increment(1);
        info!(
            tweets_found,
            valid_tweets,
            classified = predictions.len(),
            "Analyzed document"
        );

        Ok(AnalysisReport {
            tweets_found,
            valid_tweets,
            predictions,
        })
    }

    async fn predict_all(&self, texts: Vec<String>) -> Result<Vec<TweetPrediction>> {
        let tasks = texts.into_iter().map(|text| {
            let service = Arc::clone(&self.service);
            tokio::task::spawn_blocking(move || predict(&service, text))
        });

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(prediction) => prediction,
                Err(e) => Err(Error::internal(format!("classification task failed: {e}"))),
            })
            .collect()
    }
}

fn predict(service: &PredictionService, text: String) -> Result<TweetPrediction> {
    let result = service.classify(&text)?;
    Ok(TweetPrediction {
        text: preview(&text, PREVIEW_CHARS).into_owned(),
        result,
    })
}
