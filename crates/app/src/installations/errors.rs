//! Installations service errors.

use thiserror::Error;

use crate::{domain::stores::StoresServiceError, platform::PlatformError};

#[derive(Debug, Error)]
pub enum InstallationsServiceError {
    /// No live store matched.
    #[error("store not found")]
    NotFound,

    /// The session token did not verify.
    #[error("invalid session")]
    InvalidSession,

    /// The caller presented no session token.
    #[error("missing session token")]
    MissingSessionToken,

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("store storage failed")]
    Store(#[source] StoresServiceError),

    #[error("invalid app url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl InstallationsServiceError {
    /// Whether the error was caused by the caller.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NotFound | Self::InvalidSession | Self::MissingSessionToken => true,
            Self::Platform(error) => error.is_expected(),
            Self::Store(_) | Self::InvalidUrl(_) => false,
        }
    }
}

impl From<StoresServiceError> for InstallationsServiceError {
    fn from(error: StoresServiceError) -> Self {
        match error {
            StoresServiceError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}
