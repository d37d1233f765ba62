//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::secrets::SessionToken;

const SESSION_TOKEN_DEPOT_KEY: &str = "session_token";

/// Typed access to values the middleware stack leaves in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_session_token(&mut self, token: SessionToken);

    /// The caller's bearer session token, if it sent one.
    fn session_token(&self) -> Option<SessionToken>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_session_token(&mut self, token: SessionToken) {
        self.insert(SESSION_TOKEN_DEPOT_KEY, token);
    }

    fn session_token(&self) -> Option<SessionToken> {
        self.get::<SessionToken>(SESSION_TOKEN_DEPOT_KEY)
            .ok()
            .cloned()
    }
}
