//! Console Server Entry Point
//!
//! Serves the hospital console page shells behind the edge request guard.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `guard::GuardError` / `kernel::error::AppError`.

mod app;
mod pages;
mod settings;

use std::sync::Arc;

use guard::GuardConfig;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::ConsoleSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "console=info,guard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ConsoleSettings::from_env()?;
    let guard_config = GuardConfig::from_env()?;

    let addr = settings.addr;
    let app = app::build_app(settings, Arc::new(guard_config))?;

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
