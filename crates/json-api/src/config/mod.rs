//! Server configuration module

use std::net::SocketAddr;

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, http::HttpConfig, logging::LoggingConfig, platform::PlatformSettings,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod http;
pub(crate) mod logging;
pub(crate) mod platform;
pub(crate) mod server;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront app install server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Error response settings.
    #[command(flatten)]
    pub http: HttpConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Remote platform credentials and app URLs.
    #[command(flatten)]
    pub platform: PlatformSettings,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Address the server binds to.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }
}
