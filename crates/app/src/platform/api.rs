//! Platform capabilities.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use url::Url;

use crate::{
    domain::stores::records::StoreName,
    platform::PlatformError,
    secrets::{AccessToken, Nonce, SessionToken},
};

/// Result of starting an install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStart {
    /// Value the redirect must echo back as `state`.
    pub nonce: Nonce,

    /// Where to send the merchant to approve the install.
    pub redirect_target: String,
}

/// Result of checking a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionVerification {
    pub verified: bool,

    /// Store the session belongs to, set only when verified.
    pub store: Option<StoreName>,
}

impl SessionVerification {
    #[must_use]
    pub fn verified(store: StoreName) -> Self {
        Self {
            verified: true,
            store: Some(store),
        }
    }

    #[must_use]
    pub fn rejected() -> Self {
        Self {
            verified: false,
            store: None,
        }
    }
}

/// App-level operations against the platform.
#[automock]
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Validate the inbound install URL and build the authorization redirect.
    async fn begin_install(
        &self,
        store: &StoreName,
        install_url: &str,
        redirect_url: &Url,
    ) -> Result<InstallStart, PlatformError>;

    /// Validate a redirect against `nonce` and trade its authorization code
    /// for an access token.
    async fn complete_redirect(
        &self,
        store: &StoreName,
        nonce: &Nonce,
        redirected_url: &str,
    ) -> Result<AccessToken, PlatformError>;

    /// Register `callback_url` for the store's app uninstall notification.
    async fn subscribe_uninstall_webhook(
        &self,
        store: &StoreName,
        callback_url: &Url,
        access_token: &AccessToken,
    ) -> Result<(), PlatformError>;

    /// Check a session token presented by an embedded caller.
    fn verify_session(&self, token: &SessionToken) -> SessionVerification;

    /// Check the signature of a webhook delivery.
    fn verify_webhook(&self, body: &[u8], signature: &str) -> Result<(), PlatformError>;

    /// Store-scoped client using a stored access token.
    ///
    /// The counterpart of [`PlatformApi::with_session_token`] for callers
    /// that hold the long-lived token saved on redirect completion rather
    /// than a live session. Session-scoped product calls never use it.
    fn with_access_token(&self, store: &StoreName, access_token: AccessToken)
    -> Arc<dyn StoreClient>;

    /// Store-scoped client using an access token exchanged for `token`.
    ///
    /// An exchange failure does not fail here; every call on the returned
    /// client fails instead.
    async fn with_session_token(&self, store: &StoreName, token: &SessionToken)
    -> Arc<dyn StoreClient>;
}

/// Store-scoped Admin API operations.
#[automock]
#[async_trait]
pub trait StoreClient: Send + Sync {
    async fn products_count(&self) -> Result<u64, PlatformError>;

    /// Create a batch of sample products, returning how many were created.
    async fn create_products(&self) -> Result<usize, PlatformError>;
}
