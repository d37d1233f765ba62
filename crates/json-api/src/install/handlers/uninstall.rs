//! Uninstall Webhook Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use tracing::warn;

use crate::{
    errors::into_status_error, extensions::*, install::WEBHOOK_SIGNATURE_HEADER, state::State,
};

/// Uninstall Webhook Handler
///
/// Accepts the platform's `app/uninstalled` delivery and soft-deletes the
/// store once the body signature checks out.
#[endpoint(
    tags("install"),
    summary = "Uninstall Webhook",
    responses(
        (status_code = StatusCode::OK, description = "Store uninstalled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unreadable body"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Bad webhook signature"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Unknown store"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    shop: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let store = shop.into_store_name()?;
    let installations = &state.app.installations;

    let signature = req
        .header::<String>(WEBHOOK_SIGNATURE_HEADER)
        .ok_or_else(|| StatusError::unauthorized().brief("missing webhook signature"))?;

    let body = req
        .payload()
        .await
        .map_err(|_ignored| StatusError::bad_request().brief("could not read request body"))?;

    if let Err(error) = installations.verify_webhook(body, &signature) {
        warn!(store = %store, "rejected uninstall webhook: {error}");

        return Err(StatusError::unauthorized().brief("invalid webhook signature"));
    }

    installations
        .handle_uninstall(&store)
        .await
        .map_err(|error| into_status_error(error, state.send_error_details))?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::{
        installations::{InstallationsServiceError, MockInstallationsService},
        platform::PlatformError,
    };

    use crate::test_helpers::{TEST_STORE, installations_service};

    use super::*;

    const UNINSTALL: &str = "http://example.com/uninstall?shop=acme.myshopify.com";
    const BODY: &str = r#"{"id":1,"domain":"acme.myshopify.com"}"#;

    fn make_service(installations: MockInstallationsService) -> Service {
        installations_service(installations, Router::with_path("uninstall").post(handler))
    }

    #[tokio::test]
    async fn signed_delivery_uninstalls_the_store() -> TestResult {
        let mut installations = MockInstallationsService::new();

        installations
            .expect_verify_webhook()
            .once()
            .withf(|body, signature| body == BODY.as_bytes() && signature == "c2lnbmVk")
            .returning(|_, _| Ok(()));

        installations
            .expect_handle_uninstall()
            .once()
            .withf(|store| store.as_str() == TEST_STORE)
            .return_once(|_| Ok(()));

        let res = TestClient::post(UNINSTALL)
            .add_header(WEBHOOK_SIGNATURE_HEADER, "c2lnbmVk", true)
            .raw_json(BODY)
            .send(&make_service(installations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn missing_signature_is_unauthorized() -> TestResult {
        let mut installations = MockInstallationsService::new();

        installations.expect_verify_webhook().never();
        installations.expect_handle_uninstall().never();

        let res = TestClient::post(UNINSTALL)
            .raw_json(BODY)
            .send(&make_service(installations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn bad_signature_is_unauthorized_and_touches_nothing() -> TestResult {
        let mut installations = MockInstallationsService::new();

        installations
            .expect_verify_webhook()
            .once()
            .returning(|_, _| Err(PlatformError::InvalidSignature.into()));

        installations.expect_handle_uninstall().never();

        let res = TestClient::post(UNINSTALL)
            .add_header(WEBHOOK_SIGNATURE_HEADER, "Zm9yZ2Vk", true)
            .raw_json(BODY)
            .send(&make_service(installations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_store_is_a_client_error() -> TestResult {
        let mut installations = MockInstallationsService::new();

        installations
            .expect_verify_webhook()
            .once()
            .returning(|_, _| Ok(()));

        installations
            .expect_handle_uninstall()
            .once()
            .return_once(|_| Err(InstallationsServiceError::NotFound));

        let res = TestClient::post(UNINSTALL)
            .add_header(WEBHOOK_SIGNATURE_HEADER, "c2lnbmVk", true)
            .raw_json(BODY)
            .send(&make_service(installations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}
