//! CLI argument definitions for the Staffdesk server.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use staffdesk_core::StaffdeskConfig;

const DEFAULT_CONFIG_FILE: &str = "staffdesk.toml";

/// Staffdesk - healthcare staffing site with conversational lead intake.
#[derive(Parser, Debug)]
#[command(name = "staffdesk", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// HTTP port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Directory holding content.json and the journals.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Directory served as the public site.
    #[arg(long = "public-dir")]
    pub public_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Priority: --config flag > STAFFDESK_CONFIG env var > ./staffdesk.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("STAFFDESK_CONFIG") {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Priority: --port flag > PORT env var > config file value.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        resolve_port_from(self.port, std::env::var("PORT").ok(), config_port)
    }

    /// ADMIN_PASSWORD env var overrides the config file.
    pub fn resolve_admin_password(&self, config_password: &str) -> String {
        match std::env::var("ADMIN_PASSWORD") {
            Ok(p) if !p.is_empty() => p,
            _ => config_password.to_string(),
        }
    }

    /// Fold every override into the loaded configuration.
    pub fn apply(&self, mut config: StaffdeskConfig) -> StaffdeskConfig {
        config.server.port = self.resolve_port(config.server.port);
        config.admin.password = self.resolve_admin_password(&config.admin.password);
        if let Some(ref dir) = self.data_dir {
            config.storage.data_dir = dir.to_string_lossy().to_string();
        }
        if let Some(ref dir) = self.public_dir {
            config.storage.public_dir = dir.to_string_lossy().to_string();
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
        config
    }
}

fn resolve_port_from(flag: Option<u16>, env: Option<String>, config_port: u16) -> u16 {
    if let Some(p) = flag {
        return p;
    }
    if let Some(p) = env.and_then(|v| v.parse::<u16>().ok()) {
        return p;
    }
    config_port
}
