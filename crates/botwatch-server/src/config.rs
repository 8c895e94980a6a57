//! BotWatch configuration

use botwatch_classifiers::ModelConfig;
use botwatch_extract::{DEFAULT_MIN_LENGTH, DEFAULT_TEXT_KEY};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use crate::analysis::SamplePolicy;
use crate::cli::{Cli, Command};

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotwatchConfig {
    /// Artifact locations
    #[serde(default)]
    pub model: ModelConfig,

    /// Document analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl BotwatchConfig {
    /// Parse from YAML text
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &Path, cli: &Cli) -> anyhow::Result<Self> {
        // A missing file means defaults
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_yaml(&content)?
        } else {
            Self::default()
        };

        if let Some(vectorizer) = &cli.vectorizer {
            config.model.vectorizer_path = vectorizer.clone();
        }

        if let Some(classifier) = &cli.classifier {
            config.model.classifier_path = classifier.clone();
        }

        if let Command::Serve { listen, port } = &cli.command {
            if let Some(listen) = listen {
                config.server.listen = listen.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }

        Ok(config)
    }
}

/// Document analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Tweets this many characters or shorter are skipped
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Which valid tweets get classified
    #[serde(default)]
    pub sample_policy: SamplePolicy,

    /// Object key holding tweet text
    #[serde(default = "default_text_key")]
    pub text_key: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            sample_policy: SamplePolicy::default(),
            text_key: default_text_key(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Socket address to bind; `listen` is an IPv4 or IPv6 address
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .listen
            .parse()
            .with_context(|| format!("invalid listen address: {}", self.listen))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_text_key() -> String {
    DEFAULT_TEXT_KEY.to_string()
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}
