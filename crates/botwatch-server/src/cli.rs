//! Command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "botwatch")]
#[command(about = "Detect automated accounts from the text they post", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "BOTWATCH_CONFIG", default_value = "botwatch.yaml", global = true)]
    pub config: PathBuf,

    /// Vectorizer artifact, overrides the config file
    #[arg(long, env = "BOTWATCH_VECTORIZER", global = true)]
    pub vectorizer: Option<PathBuf>,

    /// Classifier artifact, overrides the config file
    #[arg(long, env = "BOTWATCH_CLASSIFIER", global = true)]
    pub classifier: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Listen address
        #[arg(short = 'l', long)]
        listen: Option<String>,

        /// Listen port
        #[arg(short = 'P', long)]
        port: Option<u16>,
    },

    /// Classify a single text and print the result as JSON
    Classify {
        /// Text to classify
        text: String,
    },

    /// Extract tweets from a JSON export and print the report as JSON
    Analyze {
        /// Twitter data export
        file: PathBuf,

        /// Classify every valid tweet instead of only the first
        #[arg(long)]
        all: bool,
    },
}
