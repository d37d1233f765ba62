//! Install Callback Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::QueryParam, prelude::*};

use crate::{errors::into_status_error, extensions::*, state::State};

/// Install Callback Handler
///
/// Completes the install from the platform redirect and sends the merchant
/// into the app.
#[endpoint(
    tags("install"),
    summary = "Complete Install",
    responses(
        (status_code = StatusCode::FOUND, description = "Redirect into the app"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid or stale redirect"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    shop: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let store = shop.into_store_name()?;
    let installations = &state.app.installations;

    installations
        .handle_redirect(&store, &req.signed_url())
        .await
        .map_err(|error| into_status_error(error, state.send_error_details))?;

    res.add_header(LOCATION, installations.app_url(&store), true)
        .or_500("failed to set location header")?;

    Ok(StatusCode::FOUND)
}
