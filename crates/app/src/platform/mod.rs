//! Remote platform integration.
//!
//! [`PlatformApi`] is the capability the installation flow depends on;
//! [`ShopifyApi`] is the only implementation today.

mod api;
mod config;
mod errors;
mod retry;
mod session;
pub mod shopify;
pub mod signature;

pub use api::*;
pub use config::PlatformConfig;
pub use errors::PlatformError;
pub use retry::RetryConfig;
pub use session::SessionClaims;
pub use shopify::ShopifyApi;
