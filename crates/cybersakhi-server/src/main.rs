//! CyberSakhi Server
//!
//! Serves the password checker, harassment detector, chat assistant and
//! complaint preparation endpoints over HTTP.

use anyhow::Result;
use clap::Parser;
use cybersakhi_server::{create_router, AppState, Cli, ServerConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting CyberSakhi server");

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!(
        "Classification timeout: {}ms",
        config.classification_timeout_ms
    );

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    let state = AppState::new(config, metrics_handle)?;

    let addr: SocketAddr = format!("{}:{}", cli.listen, cli.port).parse()?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
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

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("cybersakhi=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cybersakhi=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "cybersakhi_requests_total",
        "Total number of API requests by endpoint"
    );
    metrics::describe_counter!(
        "cybersakhi_classification_anomalies_total",
        "Classifier responses that deviated from the schema, by anomaly kind"
    );
    metrics::describe_counter!(
        "cybersakhi_classification_errors_total",
        "Failed harassment classifications by error kind"
    );
    metrics::describe_histogram!(
        "cybersakhi_classification_latency_us",
        metrics::Unit::Microseconds,
        "Harassment classification latency in microseconds"
    );
    metrics::describe_counter!("cybersakhi_errors_total", "Total number of server errors by kind");

    info!("Metrics exporter initialized");
    Ok(handle)
}
