use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use referee_watch::config::AppConfig;
use referee_watch::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "referee_watch=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    info!(
        source = ?config.source,
        target_team = %config.target_team,
        match_ids = config.match_ids.len(),
        "starting referee analysis server"
    );

    let app = web::router(AppState::from_config(&config));
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("bind {}", config.bind))?;
    info!(addr = %config.bind, "listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
