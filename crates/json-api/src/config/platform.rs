//! Platform Config

use std::time::Duration;

use clap::Args;
use url::Url;

use storefront_app::{
    installations::InstallationsConfig,
    platform::{PlatformConfig, RetryConfig},
    secrets::ApiSecret,
};

/// Remote platform credentials, app URLs and retry policy.
#[derive(Debug, Args)]
pub struct PlatformSettings {
    /// App client id
    #[arg(long, env = "SHOPIFY_API_KEY")]
    pub api_key: String,

    /// App client secret
    #[arg(long, env = "SHOPIFY_API_SECRET", hide_env_values = true)]
    pub api_secret: String,

    /// Comma separated access scopes requested on install
    #[arg(long, env = "SHOPIFY_SCOPES", default_value = "write_products")]
    pub scopes: String,

    /// Admin API version
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = "2024-10")]
    pub api_version: String,

    /// Public base URL of this server
    #[arg(long, env = "APP_BASE_URL")]
    pub app_base_url: Url,

    /// Send every store call to this origin instead of the store's own host
    #[arg(long, env = "SHOPIFY_STORE_ORIGIN_OVERRIDE", hide = true)]
    pub store_origin_override: Option<Url>,

    /// Retries for idempotent platform calls
    #[arg(long, env = "PLATFORM_MAX_RETRIES", default_value_t = 3)]
    pub max_retries: u32,

    /// Longest single wait between retries
    #[arg(long, env = "PLATFORM_MAX_BACKOFF_MS", default_value_t = 30_000)]
    pub max_backoff_ms: u64,
}

impl PlatformSettings {
    pub(crate) fn platform_config(&self) -> PlatformConfig {
        PlatformConfig {
            api_key: self.api_key.clone(),
            api_secret: ApiSecret::from(self.api_secret.as_str()),
            scopes: self.scopes.clone(),
            api_version: self.api_version.clone(),
            store_origin_override: self.store_origin_override.clone(),
            retry: RetryConfig {
                max_retries: self.max_retries,
                max_backoff: Duration::from_millis(self.max_backoff_ms),
                ..RetryConfig::default()
            },
        }
    }

    pub(crate) fn installations_config(&self) -> InstallationsConfig {
        InstallationsConfig {
            app_base_url: self.app_base_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}
