//! Runtime configuration.
//!
//! Values come from built-in defaults, overridden by `BOULDER_*` environment
//! variables (e.g. `BOULDER_DATABASE_URL`, `BOULDER_LISTEN_ADDR`).

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_PREFIX: &str = "BOULDER_";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub max_connections: u32,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:boulder.db".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            loglevel: "info".to_string(),
            max_connections: 5,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Defaults merged with the process environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
