//! Staffdesk binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Initialize tracing
//! 3. Build shared state (session store, content, journals)
//! 4. Serve the site and API

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use staffdesk_api::routes;
use staffdesk_api::state::AppState;
use staffdesk_core::StaffdeskConfig;

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first so its log level can seed the filter. The load outcome
    // is reported once the subscriber is installed.
    let config_file = args.resolve_config_path();
    let loaded = StaffdeskConfig::load_if_present(&config_file);
    let config = args.apply(match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => StaffdeskConfig::default(),
    });

    // Tracing. RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Staffdesk v{}", env!("CARGO_PKG_VERSION"));
    match loaded {
        Ok(Some(_)) => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Ok(None) => tracing::info!(
            path = %config_file.display(),
            "No configuration file, using defaults"
        ),
        Err(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load configuration, using defaults"
        ),
    }

    if let Err(e) = std::fs::create_dir_all(&config.storage.data_dir) {
        tracing::error!(path = %config.storage.data_dir, error = %e, "Failed to create data directory");
        return Err(e.into());
    }
    tracing::info!(
        data_dir = %config.storage.data_dir,
        public_dir = %config.storage.public_dir,
        "Storage ready"
    );

    let state = AppState::new(config);

    routes::start_server(state).await?;

    Ok(())
}
