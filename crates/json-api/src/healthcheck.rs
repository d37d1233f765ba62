//! Liveness Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Healthcheck handler
///
/// Answers as long as the process is serving requests. Served on both
/// `/healthcheck` and `/ping`.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn healthcheck_and_ping_report_ok() -> TestResult {
        let service = Service::new(
            Router::new()
                .push(Router::with_path("healthcheck").get(handler))
                .push(Router::with_path("ping").get(handler)),
        );

        for url in ["http://example.com/healthcheck", "http://example.com/ping"] {
            let response: HealthResponse = TestClient::get(url)
                .send(&service)
                .await
                .take_json()
                .await?;

            assert_eq!(response.status, "ok");
        }

        Ok(())
    }
}
