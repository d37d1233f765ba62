//! Create Sample Products Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{errors::into_status_error, extensions::*, state::State};

/// Created products response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsCreatedResponse {
    /// Number of products created
    pub created: usize,
}

/// Create Sample Products Handler
///
/// Creates a handful of randomly titled products in the caller's store.
#[endpoint(
    tags("products"),
    summary = "Create Sample Products",
    security(("session_token" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Products created"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid session token"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Rejected by the platform"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ProductsCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let created = state
        .app
        .installations
        .create_products(depot.session_token())
        .await
        .map_err(|error| into_status_error(error, state.send_error_details))?;

    Ok(Json(ProductsCreatedResponse { created }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::{installations::MockInstallationsService, platform::PlatformError};

    use crate::test_helpers::installations_service;

    use super::*;

    const CREATE: &str = "http://example.com/api/products/create";

    fn make_service(installations: MockInstallationsService) -> Service {
        installations_service(
            installations,
            Router::with_path("api/products/create")
                .get(handler)
                .post(handler),
        )
    }

    #[tokio::test]
    async fn get_and_post_both_create_products() -> TestResult {
        let mut installations = MockInstallationsService::new();

        installations
            .expect_create_products()
            .times(2)
            .withf(|token| token.is_some())
            .returning(|_| Ok(5));

        let service = make_service(installations);

        for request in [TestClient::get(CREATE), TestClient::post(CREATE)] {
            let mut res = request
                .add_header(AUTHORIZATION, "Bearer jwt", true)
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::OK));

            let body: ProductsCreatedResponse = res.take_json().await?;

            assert_eq!(body.created, 5);
        }

        Ok(())
    }

    #[tokio::test]
    async fn rejected_session_exchange_is_a_client_error() -> TestResult {
        let mut installations = MockInstallationsService::new();

        installations.expect_create_products().once().return_once(|_| {
            Err(PlatformError::ClientUnavailable(Arc::new(
                PlatformError::SessionTokenRejected(StatusCode::UNAUTHORIZED),
            ))
            .into())
        });

        let res = TestClient::post(CREATE)
            .add_header(AUTHORIZATION, "Bearer jwt", true)
            .send(&make_service(installations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}
