//! RADAR - REST data access service for CWMS water data.
//!
//! # Usage
//!
//! ```bash
//! # Start with default config
//! radar
//!
//! # Start with environment overrides
//! DATABASE_URL=postgres://localhost/cwms PORT=7000 radar
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tokio::sync::watch;
use tracing::{Instrument, debug, error, info, info_span, warn};
use tracing_subscriber::{EnvFilter, fmt};

use radar_api::{AppState, ServerConfig, serve_with_shutdown};
use radar_core::metrics::init_metrics;
use radar_storage::{Database, DatabaseConfig, PgRepositories};

/// RADAR CLI - CWMS data access server.
#[derive(Parser, Debug)]
#[command(name = "radar")]
#[command(about = "RADAR - REST data access service for CWMS water data")]
#[command(version)]
struct Cli {
    /// PostgreSQL database URL.
    #[arg(long, env = "DATABASE_URL", default_value = "postgres://localhost/cwms")]
    database_url: String,

    /// REST server port.
    #[arg(long, env = "PORT", default_value = "7000")]
    port: u16,

    /// Prometheus metrics port.
    #[arg(long, env = "METRICS_PORT", default_value = "9090")]
    metrics_port: u16,

    /// Enable JSON log output.
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    // Prometheus metrics exporter (optional - failures don't crash the app)
    let metrics_enabled = match format!("0.0.0.0:{}", cli.metrics_port).parse::<std::net::SocketAddr>() {
        Ok(metrics_addr) => {
            match PrometheusBuilder::new()
                .with_http_listener(metrics_addr)
                .install()
            {
                Ok(()) => {
                    init_metrics();
                    true
                }
                Err(e) => {
                    warn!("⚠️  Failed to start metrics exporter: {}. Continuing without metrics.", e);
                    false
                }
            }
        }
        Err(e) => {
            warn!("⚠️  Invalid metrics address: {}. Continuing without metrics.", e);
            false
        }
    };

    // ─────────────────────────────────────────────────────────────────────────
    // 🚀 STARTUP
    // ─────────────────────────────────────────────────────────────────────────
    info!("🚀 Starting RADAR");
    debug!(database_url = %mask_password(&cli.database_url), "Database endpoint");

    // ─────────────────────────────────────────────────────────────────────────
    // 🗄️ DATABASE
    // ─────────────────────────────────────────────────────────────────────────
    let db_config = DatabaseConfig::for_api(&cli.database_url);

    info!("🗄️  Connecting to database...");
    let db = Database::connect(&db_config)
        .await
        .context("Failed to connect to database")?;

    if !db.is_healthy().await {
        anyhow::bail!("Database connection is not healthy");
    }
    info!("🗄️  Database ready");

    let db = Arc::new(db);
    let repositories = Arc::new(PgRepositories::new(db.clone()));

    // ─────────────────────────────────────────────────────────────────────────
    // ⚡ SERVER START
    // ─────────────────────────────────────────────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let server_config = ServerConfig {
        host: "0.0.0.0".to_string(),
        port: cli.port,
    };
    let state = AppState::new(repositories);

    let server_handle = tokio::spawn(
        async move {
            let shutdown = async move {
                while !*shutdown_rx.borrow() {
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            };

            if let Err(e) = serve_with_shutdown(state, server_config, shutdown).await {
                error!(error = %e, "❌ Server error");
            }
            debug!("Server stopped");
        }
        .instrument(info_span!("rest")),
    );

    // ─────────────────────────────────────────────────────────────────────────
    // ✅ READY
    // ─────────────────────────────────────────────────────────────────────────
    info!("✅ RADAR ready");
    info!("   ⚡ REST:     http://localhost:{}", cli.port);
    if metrics_enabled {
        info!(
            "   📊 Metrics:  http://localhost:{}/metrics",
            cli.metrics_port
        );
    } else {
        info!("   📊 Metrics:  disabled");
    }
    info!("   Press Ctrl+C to stop");

    shutdown_signal().await;

    // ─────────────────────────────────────────────────────────────────────────
    // 🛑 SHUTDOWN
    // ─────────────────────────────────────────────────────────────────────────
    info!("🛑 Shutting down...");
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(std::time::Duration::from_secs(10), server_handle).await {
        Ok(_) => debug!("Server stopped"),
        Err(_) => warn!("⚠️  Server shutdown timed out"),
    }

    db.close().await;

    info!("🛑 Shutdown complete");
    Ok(())
}

/// Initialize tracing subscriber.
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }
}

/// Mask password in database URL for logging.
fn mask_password(url_str: &str) -> String {
    match url::Url::parse(url_str) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("****"));
            }
            url.to_string()
        }
        Err(_) => url_str.to_string(),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
