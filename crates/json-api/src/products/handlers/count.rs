//! Products Count Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{errors::into_status_error, extensions::*, state::State};

/// Products count response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsCountResponse {
    /// Number of products in the store
    pub count: u64,
}

/// Products Count Handler
#[endpoint(
    tags("products"),
    summary = "Count Products",
    security(("session_token" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Products counted"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid session token"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Rejected by the platform"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsCountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let count = state
        .app
        .installations
        .get_products_count(depot.session_token())
        .await
        .map_err(|error| into_status_error(error, state.send_error_details))?;

    Ok(Json(ProductsCountResponse { count }))
}
