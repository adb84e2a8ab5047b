use anyhow::{Context, Result};
use tourism_backoffice::config::AppConfig;
use tourism_backoffice::facade::Backoffice;
use tourism_backoffice::storage::Collections;
use tourism_backoffice::web::{AppState, build_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load();
    init_tracing(config.log_filter.as_deref());

    let collections = Collections::open(&config.data_dir)
        .await
        .with_context(|| format!("failed to open data directory {}", config.data_dir.display()))?;
    info!(data_dir = %config.data_dir.display(), "collections ready");

    let app = build_router(AppState::new(Backoffice::new(collections)));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "tourism back-office started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "tourism_backoffice=debug,tower_http=info";

/// `--log-filter` wins over `RUST_LOG`, which wins over the built-in default.
fn init_tracing(directives: Option<&str>) {
    let filter = directives
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let received = wait_for_signal().await;
    info!(signal = received, "shutting down after in-flight requests");
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(err) => {
            warn!(error = %err, "SIGTERM handler unavailable; only Ctrl+C stops the server");
            return ctrl_c().await;
        }
    };

    tokio::select! {
        received = ctrl_c() => received,
        _ = terminate.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
    "Ctrl+C"
}
