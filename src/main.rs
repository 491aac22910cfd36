use anyhow::{Context, Result};
use i18n_context::config::Config;
use i18n_context::{server, I18nContextManager};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18n_context=info".parse()?),
        )
        .init();

    info!("Starting i18n context server");

    let config = Config::from_env()?;
    let i18n_config = config.load_i18n_config()?;
    info!(
        "Loaded {} zones (default zone: {})",
        i18n_config.zones.len(),
        i18n_config.default_zone.is_some()
    );

    let manager = I18nContextManager::from_config(&i18n_config)
        .context("Failed to compose adapter registries")?;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, server::router(Arc::new(manager))).await?;
    Ok(())
}
