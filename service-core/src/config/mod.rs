use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::net::SocketAddr;

/// Settings shared by every service: where the HTTP listener binds.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load from an optional `configuration` file, then `APP__*` variables.
    ///
    /// A `.env` file in the working directory is applied first so the
    /// service-specific loaders see the same environment.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "invalid listen address {}:{}: {}",
                    self.host,
                    self.port,
                    e
                ))
            })
    }
}
