//! Resolve an i18n context from explicit routing parameters and print it as JSON
//!
//! Usage:
//!   cargo run --bin resolve-context -- route '{"_locale":"de_AT","_host":"example.at"}'
//!   cargo run --bin resolve-context -- route '{"_locale":"de_AT","path":"/kontakt"}' --full
//!
//! Optional environment variables:
//! - I18N_CONFIG_PATH (zones and adapter table; built-in defaults otherwise)

use anyhow::{Context, Result};
use i18n_context::builder::RouteParameters;
use i18n_context::config::Config;
use i18n_context::I18nContextManager;
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18n_context=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let full_bootstrap = args.iter().any(|arg| arg == "--full");
    let positional: Vec<&String> = args.iter().filter(|arg| !arg.starts_with("--")).collect();

    let Some(route_type) = positional.first() else {
        anyhow::bail!("Usage: resolve-context <type> [parameters-json] [--full]");
    };
    let parameters: RouteParameters = match positional.get(1) {
        Some(raw) => serde_json::from_str(raw).context("Routing parameters must be a JSON object")?,
        None => RouteParameters::new(),
    };

    let config = Config::from_env()?;
    let i18n_config = config.load_i18n_config()?;
    let manager = I18nContextManager::from_config(&i18n_config)
        .context("Failed to compose adapter registries")?;

    info!(
        "Resolving {} route with {} parameters (full bootstrap: {})",
        route_type,
        parameters.len(),
        full_bootstrap
    );
    let context = manager.build_context_by_parameters(route_type, &parameters, full_bootstrap)?;

    println!("{}", serde_json::to_string_pretty(&context.summary()?)?);
    Ok(())
}
