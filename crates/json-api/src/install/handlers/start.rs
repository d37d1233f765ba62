//! Start Install Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::QueryParam, prelude::*};

use crate::{errors::into_status_error, extensions::*, state::State};

/// Start Install Handler
///
/// Sends the merchant to the platform's authorization screen, or out of the
/// install iframe when the store is already installed.
#[endpoint(
    tags("install"),
    summary = "Start Install",
    responses(
        (status_code = StatusCode::FOUND, description = "Redirect to authorization"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid request"),
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

    let target = state
        .app
        .installations
        .handle(&store, &req.signed_url())
        .await
        .map_err(|error| into_status_error(error, state.send_error_details))?;

    res.add_header(LOCATION, target, true)
        .or_500("failed to set location header")?;

    Ok(StatusCode::FOUND)
}
