//! API server entry point.
//!
//! Uses `anyhow` for startup errors; request-level errors are
//! `attendance_engine::error::EngineError`.

use std::env;

use anyhow::Context;
use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attendance_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = env::var("ENGINE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("failed to load configuration from {}", config_dir))?;

    tracing::info!(
        config_dir = %config_dir,
        engine = %config.engine().name,
        version = %config.engine().version,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let bind_addr = env::var("ENGINE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(addr = %bind_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
