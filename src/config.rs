//! Configuration loading
//!
//! Layers, lowest priority first: embedded defaults, `config/local.toml`,
//! the `--config` file, then `KEYCHAIN_ACCESS_*` environment variables
//! (`KEYCHAIN_ACCESS_KEYCHAIN__ENCODING=raw`).

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use keychain_access_core::KeychainConfig;
use serde::Deserialize;
use std::path::Path;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub keychain: KeychainConfig,
}

fn default_log_level() -> String {
    "keychain_access=info,keychain_access_core=info".to_string()
}

/// Load configuration from files and environment
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let mut builder = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::with_name("config/local").required(false));

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder
        .add_source(
            Environment::with_prefix("KEYCHAIN_ACCESS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?
        .try_deserialize()
        .context("Failed to deserialize configuration")
}
