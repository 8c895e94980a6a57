//! BotWatch Server
//!
//! Wires the prediction service and tweet extraction into the `botwatch`
//! binary: configuration, the HTTP API and the command-line interface.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use analysis::{AnalysisReport, SamplePolicy, TweetAnalyzer, TweetPrediction};
pub use config::BotwatchConfig;
pub use routes::create_router;
pub use state::AppState;
