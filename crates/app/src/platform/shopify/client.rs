//! Store-scoped Admin API client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::{
    domain::stores::records::StoreName,
    platform::{
        PlatformConfig, PlatformError, StoreClient,
        retry::{RetryMode, send_with_retry},
        shopify::{ACCESS_TOKEN_HEADER, titles},
    },
    secrets::AccessToken,
};

const SAMPLE_PRODUCT_COUNT: usize = 5;

/// Admin API client bound to one store and one access token.
///
/// Built even when no token could be obtained; in that case every call
/// returns [`PlatformError::ClientUnavailable`] with the underlying failure.
#[derive(Debug)]
pub struct ShopifyStoreClient {
    http: Client,
    config: Arc<PlatformConfig>,
    store: StoreName,
    endpoint: Result<(Url, AccessToken), Arc<PlatformError>>,
}

impl ShopifyStoreClient {
    pub(crate) fn new(
        http: Client,
        config: Arc<PlatformConfig>,
        store: StoreName,
        endpoint: Result<(Url, AccessToken), Arc<PlatformError>>,
    ) -> Self {
        Self {
            http,
            config,
            store,
            endpoint,
        }
    }

    fn endpoint(&self) -> Result<(&Url, &AccessToken), PlatformError> {
        match &self.endpoint {
            Ok((origin, access_token)) => Ok((origin, access_token)),
            Err(source) => Err(PlatformError::ClientUnavailable(Arc::clone(source))),
        }
    }

    fn admin_url(&self, origin: &Url, resource: &str) -> Result<Url, PlatformError> {
        Ok(origin.join(&format!(
            "admin/api/{}/{resource}",
            self.config.api_version
        ))?)
    }
}

#[async_trait]
impl StoreClient for ShopifyStoreClient {
    #[tracing::instrument(skip_all, fields(store = %self.store))]
    async fn products_count(&self) -> Result<u64, PlatformError> {
        let (origin, access_token) = self.endpoint()?;

        let request = self
            .http
            .get(self.admin_url(origin, "products/count.json")?)
            .header(ACCESS_TOKEN_HEADER, access_token.expose());

        let response = send_with_retry(request, &self.config.retry, RetryMode::Transient).await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PlatformError::UnexpectedResponse(format!(
                "products count failed with status {status}: {text}"
            )));
        }

        let parsed: CountResponse = response.json().await?;

        debug!(count = parsed.count, "fetched products count");

        Ok(parsed.count)
    }

    #[tracing::instrument(skip_all, fields(store = %self.store))]
    async fn create_products(&self) -> Result<usize, PlatformError> {
        let (origin, access_token) = self.endpoint()?;

        let url = self.admin_url(origin, "products.json")?;
        let product_titles = titles::random_titles(&mut rand::thread_rng(), SAMPLE_PRODUCT_COUNT);

        let mut created = 0;

        for title in &product_titles {
            let body = ProductRequest {
                product: NewProduct { title },
            };

            let response = self
                .http
                .post(url.clone())
                .header(ACCESS_TOKEN_HEADER, access_token.expose())
                .json(&body)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();

                return Err(PlatformError::UnexpectedResponse(format!(
                    "product creation failed with status {status} after {created} created: {text}"
                )));
            }

            created += 1;
        }

        info!(created, "created sample products");

        Ok(created)
    }
}

#[derive(Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Serialize)]
struct ProductRequest<'a> {
    product: NewProduct<'a>,
}

#[derive(Serialize)]
struct NewProduct<'a> {
    title: &'a str,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path},
    };

    use crate::{
        platform::{
            PlatformApi,
            session::tests::{claims_for, sign},
            shopify::tests::{SECRET, api_for, store},
        },
        secrets::SessionToken,
    };

    use super::*;

    fn session_token() -> SessionToken {
        sign(&claims_for("acme.myshopify.com", "app-key"), SECRET)
    }

    #[tokio::test]
    async fn products_count_is_retried_after_transient_failure() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/api/2024-10/products/count.json"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/admin/api/2024-10/products/count.json"))
            .and(header(ACCESS_TOKEN_HEADER, "shpat_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 12})))
            .expect(1)
            .mount(&server)
            .await;

        let client = api_for(&server).with_access_token(&store(), AccessToken::from("shpat_123"));

        assert_eq!(client.products_count().await?, 12);

        Ok(())
    }

    #[tokio::test]
    async fn create_products_posts_five_titled_products() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/api/2024-10/products.json"))
            .and(header(ACCESS_TOKEN_HEADER, "shpat_123"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"product": {"id": 1}})))
            .expect(5)
            .mount(&server)
            .await;

        let client = api_for(&server).with_access_token(&store(), AccessToken::from("shpat_123"));

        assert_eq!(client.create_products().await?, 5);

        let requests = server.received_requests().await.unwrap_or_default();

        for request in requests {
            let body: serde_json::Value = serde_json::from_slice(&request.body)?;
            let title = body["product"]["title"].as_str().unwrap_or_default();

            assert_eq!(title.split(' ').count(), 2, "unexpected title {title:?}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn session_token_is_exchanged_before_use() -> TestResult {
        let server = MockServer::start().await;
        let token = session_token();

        Mock::given(method("POST"))
            .and(path("/admin/oauth/access_token"))
            .and(body_partial_json(json!({
                "client_id": "app-key",
                "client_secret": SECRET,
                "grant_type": "urn:ietf:params:oauth:grant-type:token-exchange",
                "subject_token": token.expose(),
                "subject_token_type": "urn:ietf:params:oauth:token-type:id_token",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "shpat_exchanged",
                "token_type": "bearer",
                "expires_in": 86399,
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/admin/api/2024-10/products/count.json"))
            .and(header(ACCESS_TOKEN_HEADER, "shpat_exchanged"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 3})))
            .expect(1)
            .mount(&server)
            .await;

        let client = api_for(&server).with_session_token(&store(), &token).await;

        assert_eq!(client.products_count().await?, 3);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_exchange_fails_every_call_without_retrying() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/oauth/access_token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = api_for(&server)
            .with_session_token(&store(), &session_token())
            .await;

        let count = client.products_count().await;
        let created = client.create_products().await;

        for result in [count.map(|_| ()), created.map(|_| ())] {
            match result {
                Err(error @ PlatformError::ClientUnavailable(_)) => {
                    assert!(error.is_expected(), "rejected exchange is client caused");
                }
                other => panic!("expected ClientUnavailable, got {other:?}"),
            }
        }

        Ok(())
    }

    #[tokio::test]
    async fn exchange_server_error_is_unexpected() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/oauth/access_token"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;

        let client = api_for(&server)
            .with_session_token(&store(), &session_token())
            .await;

        match client.products_count().await {
            Err(error @ PlatformError::ClientUnavailable(_)) => assert!(!error.is_expected()),
            other => panic!("expected ClientUnavailable, got {other:?}"),
        }

        Ok(())
    }
}
