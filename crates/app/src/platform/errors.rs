//! Platform client errors.

use std::sync::Arc;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the remote platform.
///
/// Variants caused by the caller (bad input, rejected credentials) are
/// *expected*; see [`PlatformError::is_expected`].
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("invalid store domain: {0}")]
    InvalidStoreDomain(String),

    #[error("request signature is missing or invalid")]
    InvalidSignature,

    #[error("nonce does not match the latest install attempt")]
    NonceMismatch,

    #[error("redirect was issued for a different store")]
    StoreMismatch,

    #[error("redirect is missing the authorization code")]
    MissingAuthorizationCode,

    #[error("platform rejected the authorization code with status {0}")]
    AuthorizationRejected(StatusCode),

    #[error("platform rejected the session token with status {0}")]
    SessionTokenRejected(StatusCode),

    /// The uninstall webhook address is already registered for the store.
    #[error("webhook is already registered")]
    WebhookAlreadyRegistered,

    /// The store client could not be set up; the source is the failure that
    /// happened at construction, usually the session token exchange.
    #[error("store client unavailable: {0}")]
    ClientUnavailable(#[source] Arc<PlatformError>),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from platform: {0}")]
    UnexpectedResponse(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl PlatformError {
    /// Whether the error was caused by the caller rather than by this service
    /// or the platform misbehaving.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidStoreDomain(_)
            | Self::InvalidSignature
            | Self::NonceMismatch
            | Self::StoreMismatch
            | Self::MissingAuthorizationCode
            | Self::AuthorizationRejected(_)
            | Self::SessionTokenRejected(_) => true,
            Self::ClientUnavailable(source) => source.is_expected(),
            Self::WebhookAlreadyRegistered
            | Self::Http(_)
            | Self::UnexpectedResponse(_)
            | Self::InvalidUrl(_) => false,
        }
    }
}
