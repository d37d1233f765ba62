//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Failures that are never the caller's fault, such as a redirect target
/// that cannot be written as a `Location` header.
pub(crate) trait ResultExt<T> {
    /// Log `error` under `context` and answer 500.
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!(%error, "{context}");

            StatusError::internal_server_error()
        })
    }
}
