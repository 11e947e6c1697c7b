// Configuration module
// Loads settings from an optional config file and GAMESTUB_* environment variables.

use crate::mocks::MockStore;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Content root: static assets plus the `mock/` response files.
    pub root: String,
    pub workers: Option<usize>,
    pub access_log: bool,
}

impl Config {
    /// Load configuration from "config.toml" in the working directory.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension).
    /// The file is optional; `GAMESTUB_PORT` etc. override it.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("GAMESTUB"))
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("root", ".")?
            .set_default("access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Shared per-process state. Populated before the listener starts accepting
/// and read-only afterwards, so request tasks share it without locking.
pub struct AppState {
    pub config: Config,
    pub root: PathBuf,
    pub mocks: MockStore,
}

impl AppState {
    pub const fn new(config: Config, root: PathBuf, mocks: MockStore) -> Self {
        Self { config, root, mocks }
    }
}
