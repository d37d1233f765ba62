//! State

use std::sync::Arc;

use storefront_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Include the error chain in 500 responses.
    pub(crate) send_error_details: bool,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, send_error_details: bool) -> Self {
        Self {
            app,
            send_error_details,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, send_error_details: bool) -> Arc<Self> {
        Arc::new(Self::new(app, send_error_details))
    }
}
