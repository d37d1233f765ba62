//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use storefront_app::{context::AppContext, installations::MockInstallationsService};

use crate::{auth, state::State};

pub(crate) const TEST_STORE: &str = "acme.myshopify.com";

pub(crate) fn state_with_installations(
    installations: MockInstallationsService,
    send_error_details: bool,
) -> Arc<State> {
    State::from_app_context(
        AppContext {
            installations: Arc::new(installations),
        },
        send_error_details,
    )
}

pub(crate) fn installations_service(
    installations: MockInstallationsService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_installations(installations, false)))
            .hoop(auth::middleware::handler)
            .push(route),
    )
}
