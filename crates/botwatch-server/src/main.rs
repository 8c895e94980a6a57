//! BotWatch
//!
//! Classifies short texts as human-written or as one of four kinds of bot,
//! from the command line or over HTTP.

use anyhow::{Context, Result};
use botwatch_classifiers::PredictionService;
use botwatch_server::{
    cli::{Cli, Command},
    AppState, BotwatchConfig, SamplePolicy, TweetAnalyzer,
};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = BotwatchConfig::load(&cli.config, &cli)?;
    info!(config = %cli.config.display(), "Configuration loaded");

    match &cli.command {
        Command::Serve { .. } => serve(config).await,
        Command::Classify { text } => classify(&config, text),
        Command::Analyze { file, all } => analyze(config, file, *all).await,
    }
}

async fn serve(config: BotwatchConfig) -> Result<()> {
    info!("Starting BotWatch server");

    let metrics_handle = init_metrics()?;

    let addr = config.server.socket_addr()?;

    let state = AppState::new(config, metrics_handle);
    let app = botwatch_server::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn classify(config: &BotwatchConfig, text: &str) -> Result<()> {
    let service = PredictionService::load(&config.model);
    let result = service.classify(text)?;

    let output = json!({
        "label": result.label,
        "display_name": result.label.display_name(),
        "confidence": result.confidence,
        "probabilities": result.probabilities,
        "insights": result.label.insights(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn analyze(config: BotwatchConfig, file: &Path, all: bool) -> Result<()> {
    let document = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let policy = if all {
        SamplePolicy::All
    } else {
        config.analysis.sample_policy
    };

    let service = Arc::new(PredictionService::load(&config.model));
    let analyzer = TweetAnalyzer::new(service, &config.analysis);
    let report = analyzer.analyze(&document, policy).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging; logs go to stderr so command output stays parseable
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("botwatch=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("botwatch=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "botwatch_requests_total",
        "Total number of API requests by endpoint"
    );
    metrics::describe_counter!(
        "botwatch_predictions_total",
        "Total number of successful predictions by label"
    );
    metrics::describe_histogram!(
        "botwatch_classify_latency_us",
        metrics::Unit::Microseconds,
        "Classification latency in microseconds"
    );
    metrics::describe_counter!(
        "botwatch_documents_analyzed_total",
        "Total number of documents analyzed"
    );
    metrics::describe_counter!("botwatch_errors_total", "Total number of errors by kind");

    info!("Metrics exporter initialized");
    Ok(handle)
}
