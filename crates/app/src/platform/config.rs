//! Platform client configuration.

use url::Url;

use crate::{platform::RetryConfig, secrets::ApiSecret};

/// App credentials and endpoints for talking to the platform.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Public client id of the app.
    pub api_key: String,

    pub api_secret: ApiSecret,

    /// Comma separated access scopes requested at install time.
    pub scopes: String,

    /// Admin API version, e.g. `2024-10`.
    pub api_version: String,

    /// Send every store request to this origin instead of `https://{store}`.
    /// Only meant for local development and tests.
    pub store_origin_override: Option<Url>,

    pub retry: RetryConfig,
}
