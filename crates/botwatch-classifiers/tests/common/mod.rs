//! Hand-built fitted model for tests
//!
//! Every class gets a handful of cue n-grams. Each cue is a decision stump
//! that adds one unit of margin to its class when the n-gram is present,
//! which is enough structure to exercise the real vectorizer and tree code.

#![allow(dead_code)]

use botwatch_classifiers::{
    classifier_from_json, vectorizer_from_json, CharNgramVectorizer, GradientBoostedTrees,
    PredictionService,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

pub const CUES: [(usize, &[&str]); 5] = [
    (0, &["my ", "amaz", "grat", "fami", "book", "love"]),
    (1, &["news", "upda", "trend", "score", "price"]),
    (2, &["follo", "boost", "growt", "viral", "views"]),
    (3, &["win_", "free", "click", "offer", "cash", "money", "bonus", "urgen", "mirac", "secre"]),
    (4, &["suppo", "order", "accou", "refun", "billi", "deliv", "passw"]),
];

pub fn vectorizer_json() -> Value {
    let mut vocabulary = serde_json::Map::new();
    let mut index = 0;
    for (_, cues) in CUES {
        for cue in cues {
            vocabulary.insert(cue.to_string(), json!(index));
            index += 1;
        }
    }

    json!({
        "analyzer": "char",
        "ngram_range": [3, 5],
        "lowercase": true,
        "vocabulary": vocabulary,
    })
}

pub fn classifier_json() -> Value {
    let mut trees = Vec::new();
    let mut feature = 0;
    for (class, cues) in CUES {
        for _ in cues.iter() {
            trees.push(json!({
                "class": class,
                "nodes": [
                    {"id": 0, "split": feature, "threshold": 0.5, "yes": 1, "no": 2, "missing": 1},
                    {"id": 1, "leaf": 0.0},
                    {"id": 2, "leaf": 1.0},
                ]
            }));
            feature += 1;
        }
    }

    json!({
        "num_class": 5,
        "num_features": feature,
        "base_score": 0.5,
        "missing_zero": true,
        "trees": trees,
    })
}

pub fn vectorizer() -> CharNgramVectorizer {
    vectorizer_from_json(&vectorizer_json().to_string()).unwrap()
}

pub fn classifier() -> GradientBoostedTrees {
    classifier_from_json(&classifier_json().to_string()).unwrap()
}

pub fn service() -> PredictionService {
    PredictionService::new(Arc::new(vectorizer()), Arc::new(classifier()))
}

/// Write both artifacts into `dir` under the default file names
pub fn write_artifacts(dir: &Path) {
    std::fs::write(
        dir.join(botwatch_classifiers::config::VECTORIZER_FILE),
        serde_json::to_string_pretty(&vectorizer_json()).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.join(botwatch_classifiers::config::CLASSIFIER_FILE),
        serde_json::to_string_pretty(&classifier_json()).unwrap(),
    )
    .unwrap();
}
