//! HTTP listener configuration.

use std::env;
use std::net::{AddrParseError, SocketAddr};

use crate::db::repo_config::ServerSettings;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Where the server listens and whether it seeds the sample roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Replace the store contents with the sample roster at start-up.
    pub seed_sample_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed_sample_data: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `SEED_SAMPLE_DATA`; unparsable values keep
    /// their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            seed_sample_data: env::var("SEED_SAMPLE_DATA")
                .ok()
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.seed_sample_data),
        }
    }

    /// Overlay the keys a `[server]` table sets.
    pub fn with_settings(mut self, settings: &ServerSettings) -> Self {
        if let Some(host) = &settings.host {
            self.host = host.clone();
        }
        if let Some(port) = settings.port {
            self.port = port;
        }
        if let Some(seed) = settings.seed_sample_data {
            self.seed_sample_data = seed;
        }
        self
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
