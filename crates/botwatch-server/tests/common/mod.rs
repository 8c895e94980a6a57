//! Small fitted model and app state for router tests

#![allow(dead_code)]

use botwatch_classifiers::{classifier_from_json, vectorizer_from_json, PredictionService};
use botwatch_server::{AppState, BotwatchConfig};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

/// Cue n-grams per class ordinal
const CUES: [&[&str]; 5] = [
    &["amaz", "love", "fami"],
    &["news", "upda"],
    &["follo", "boost"],
    &["free", "win_", "click", "offer"],
    &["suppo", "refun"],
];

pub fn vectorizer_json() -> Value {
    let mut vocabulary = serde_json::Map::new();
    for cue in CUES.iter().flat_map(|cues| cues.iter()) {
        let index = vocabulary.len();
        vocabulary.insert(cue.to_string(), json!(index));
    }
    json!({"analyzer": "char", "ngram_range": [3, 5], "vocabulary": vocabulary})
}

pub fn classifier_json() -> Value {
    let mut trees = Vec::new();
    let mut feature = 0;
    for (class, cues) in CUES.iter().enumerate() {
        for _ in cues.iter() {
            trees.push(json!({
                "class": class,
                "nodes": [
                    {"id": 0, "split": feature, "threshold": 0.5, "yes": 1, "no": 2},
                    {"id": 1, "leaf": 0.0},
                    {"id": 2, "leaf": 1.5},
                ]
            }));
            feature += 1;
        }
    }
    json!({"num_class": 5, "num_features": feature, "trees": trees})
}

pub fn write_artifacts(dir: &Path) {
    std::fs::write(dir.join("vectorizer.json"), vectorizer_json().to_string()).unwrap();
    std::fs::write(dir.join("best_model_xgb.json"), classifier_json().to_string()).unwrap();
}

pub fn ready_service() -> PredictionService {
    let vectorizer = vectorizer_from_json(&vectorizer_json().to_string()).unwrap();
    let classifier = classifier_from_json(&classifier_json().to_string()).unwrap();
    PredictionService::new(Arc::new(vectorizer), Arc::new(classifier))
}

/// State with a handle from an uninstalled recorder, so tests never touch
/// the global metrics registry
pub fn state_with(config: BotwatchConfig, service: PredictionService) -> AppState {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    AppState::with_service(config, Arc::new(service), handle)
}

pub fn ready_state() -> AppState {
    state_with(BotwatchConfig::default(), ready_service())
}
