//! Errors

use std::error::Error;

use salvo::http::StatusError;
use tracing::{error, warn};

use storefront_app::installations::InstallationsServiceError;

pub(crate) fn into_status_error(
    error: InstallationsServiceError,
    send_details: bool,
) -> StatusError {
    match error {
        InstallationsServiceError::MissingSessionToken | InstallationsServiceError::InvalidSession => {
            StatusError::unauthorized().brief(error.to_string())
        }
        error if error.is_expected() => {
            warn!("rejected request: {error}");

            StatusError::unprocessable_entity().brief(error.to_string())
        }
        error => {
            let chain = error_chain(&error);

            error!("request failed: {chain}");

            let status = StatusError::internal_server_error();

            if send_details {
                status.detail(chain)
            } else {
                status
            }
        }
    }
}

fn error_chain(error: &dyn Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }

    chain
}
