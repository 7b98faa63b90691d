mod bootstrap;
mod health;
mod reaper;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use savory_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use savory_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;

    let reaper_handle = reaper::spawn(Arc::clone(&app.cart_store), &app.config.session);
    if reaper_handle.is_some() {
        tracing::info!(
            event_name = "system.server.reaper_enabled",
            correlation_id = "bootstrap",
            idle_timeout_secs = app.config.session.idle_timeout_secs,
            sweep_interval_secs = app.config.session.sweep_interval_secs,
            "idle session eviction enabled"
        );
    }

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        "savory-server listening for webhook calls"
    );

    let state = routes::AppState {
        dispatcher: Arc::clone(&app.dispatcher),
        db_pool: app.db_pool.clone(),
    };
    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = reaper_handle {
        handle.abort();
    }
    tracing::info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        "savory-server stopping"
    );

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
