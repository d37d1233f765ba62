//! Shopify implementation of the platform capabilities.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use rand::{RngCore, rngs::OsRng};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use url::Url;

use crate::{
    domain::stores::records::StoreName,
    platform::{
        InstallStart, PlatformApi, PlatformConfig, PlatformError, SessionVerification,
        StoreClient,
        retry::{RetryMode, send_with_retry},
        session,
        signature::{self, param, query_params},
    },
    secrets::{AccessToken, Nonce, SessionToken},
};

mod client;
mod titles;

pub use client::ShopifyStoreClient;

pub(crate) const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const STORE_DOMAIN_SUFFIX: &str = ".myshopify.com";
const AUTHORIZE_PATH: &str = "admin/oauth/authorize";
const ACCESS_TOKEN_PATH: &str = "admin/oauth/access_token";
const UNINSTALL_TOPIC: &str = "app/uninstalled";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const NONCE_BYTES: usize = 16;

const TOKEN_EXCHANGE_GRANT: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
const ID_TOKEN_TYPE: &str = "urn:ietf:params:oauth:token-type:id_token";

/// Shopify Admin API client.
#[derive(Debug, Clone)]
pub struct ShopifyApi {
    config: Arc<PlatformConfig>,
    http: Client,
}

impl ShopifyApi {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: PlatformConfig) -> Result<Self, PlatformError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Base URL for requests to `store`, after checking it is a shop domain.
    fn store_origin(&self, store: &StoreName) -> Result<Url, PlatformError> {
        validate_store_domain(store)?;

        match &self.config.store_origin_override {
            Some(origin) => Ok(origin.clone()),
            None => Ok(Url::parse(&format!("https://{store}/"))?),
        }
    }

    fn store_client(
        &self,
        store: &StoreName,
        endpoint: Result<(Url, AccessToken), PlatformError>,
    ) -> Arc<dyn StoreClient> {
        Arc::new(ShopifyStoreClient::new(
            self.http.clone(),
            Arc::clone(&self.config),
            store.clone(),
            endpoint.map_err(Arc::new),
        ))
    }

    async fn exchange_session_token(
        &self,
        origin: &Url,
        token: &SessionToken,
    ) -> Result<AccessToken, PlatformError> {
        let body = TokenExchangeRequest {
            client_id: &self.config.api_key,
            client_secret: self.config.api_secret.expose(),
            grant_type: TOKEN_EXCHANGE_GRANT,
            subject_token: token.expose(),
            subject_token_type: ID_TOKEN_TYPE,
        };

        let request = self.http.post(origin.join(ACCESS_TOKEN_PATH)?).json(&body);
        let response = send_with_retry(request, &self.config.retry, RetryMode::ConnectionOnly).await?;

        let status = response.status();

        if status.is_client_error() {
            return Err(PlatformError::SessionTokenRejected(status));
        }

        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();

            return Err(PlatformError::UnexpectedResponse(format!(
                "token exchange failed with status {status}: {text}"
            )));
        }

        let parsed: TokenExchangeResponse = response.json().await?;

        debug!(
            token_type = %parsed.token_type,
            expires_in = parsed.expires_in,
            "exchanged session token"
        );

        access_token(parsed.access_token)
    }
}

#[async_trait]
impl PlatformApi for ShopifyApi {
    #[tracing::instrument(skip_all, fields(store = %store))]
    async fn begin_install(
        &self,
        store: &StoreName,
        install_url: &str,
        redirect_url: &Url,
    ) -> Result<InstallStart, PlatformError> {
        let origin = self.store_origin(store)?;

        signature::verify_query(install_url, &self.config.api_secret)?;

        let nonce = generate_nonce();

        let mut target = origin.join(AUTHORIZE_PATH)?;

        target
            .query_pairs_mut()
            .append_pair("client_id", &self.config.api_key)
            .append_pair("scope", &self.config.scopes)
            .append_pair("redirect_uri", redirect_url.as_str())
            .append_pair("state", nonce.expose());

        debug!("built authorization redirect");

        Ok(InstallStart {
            nonce,
            redirect_target: target.into(),
        })
    }

    #[tracing::instrument(skip_all, fields(store = %store))]
    async fn complete_redirect(
        &self,
        store: &StoreName,
        nonce: &Nonce,
        redirected_url: &str,
    ) -> Result<AccessToken, PlatformError> {
        let origin = self.store_origin(store)?;

        signature::verify_query(redirected_url, &self.config.api_secret)?;

        let params = query_params(redirected_url);

        let state = param(&params, "state").unwrap_or_default();

        if nonce.is_empty() || state != nonce.expose() {
            return Err(PlatformError::NonceMismatch);
        }

        let shop = param(&params, "shop").unwrap_or_default();

        if !shop.eq_ignore_ascii_case(store.as_str()) {
            return Err(PlatformError::StoreMismatch);
        }

        let code = param(&params, "code")
            .filter(|code| !code.is_empty())
            .ok_or(PlatformError::MissingAuthorizationCode)?;

        let body = AuthorizationCodeRequest {
            client_id: &self.config.api_key,
            client_secret: self.config.api_secret.expose(),
            code,
        };

        // The authorization code is single use, so this is never retried.
        let response = self
            .http
            .post(origin.join(ACCESS_TOKEN_PATH)?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status.is_client_error() {
            return Err(PlatformError::AuthorizationRejected(status));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(PlatformError::UnexpectedResponse(format!(
                "access token request failed with status {status}: {text}"
            )));
        }

        let parsed: AuthorizationCodeResponse = response.json().await?;

        info!(scope = parsed.scope.as_deref().unwrap_or_default(), "obtained access token");

        access_token(parsed.access_token)
    }

    #[tracing::instrument(skip_all, fields(store = %store))]
    async fn subscribe_uninstall_webhook(
        &self,
        store: &StoreName,
        callback_url: &Url,
        access_token: &AccessToken,
    ) -> Result<(), PlatformError> {
        let origin = self.store_origin(store)?;

        let url = origin.join(&format!(
            "admin/api/{}/webhooks.json",
            self.config.api_version
        ))?;

        let body = WebhookRequest {
            webhook: Webhook {
                topic: UNINSTALL_TOPIC,
                address: callback_url.as_str(),
                format: "json",
            },
        };

        let request = self
            .http
            .post(url)
            .header(ACCESS_TOKEN_HEADER, access_token.expose())
            .json(&body);

        let response = send_with_retry(request, &self.config.retry, RetryMode::Transient).await?;

        let status = response.status();

        if status.is_success() {
            info!("subscribed to app uninstall webhook");

            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();

        if status == StatusCode::UNPROCESSABLE_ENTITY && text.contains("already been taken") {
            return Err(PlatformError::WebhookAlreadyRegistered);
        }

        Err(PlatformError::UnexpectedResponse(format!(
            "webhook subscription failed with status {status}: {text}"
        )))
    }

    fn verify_session(&self, token: &SessionToken) -> SessionVerification {
        session::verify(token, &self.config)
    }

    fn verify_webhook(&self, body: &[u8], signature: &str) -> Result<(), PlatformError> {
        signature::verify_webhook(body, signature, &self.config.api_secret)
    }

    fn with_access_token(
        &self,
        store: &StoreName,
        access_token: AccessToken,
    ) -> Arc<dyn StoreClient> {
        let endpoint = self
            .store_origin(store)
            .map(|origin| (origin, access_token));

        self.store_client(store, endpoint)
    }

    #[tracing::instrument(skip_all, fields(store = %store))]
    async fn with_session_token(
        &self,
        store: &StoreName,
        token: &SessionToken,
    ) -> Arc<dyn StoreClient> {
        let endpoint = match self.store_origin(store) {
            Ok(origin) => match self.exchange_session_token(&origin, token).await {
                Ok(access_token) => Ok((origin, access_token)),
                Err(exchange_error) => {
                    error!(error = %exchange_error, "failed to exchange session token");
                    Err(exchange_error)
                }
            },
            Err(origin_error) => Err(origin_error),
        };

        self.store_client(store, endpoint)
    }
}

/// Reject anything that is not a `*.myshopify.com` host.
fn validate_store_domain(store: &StoreName) -> Result<(), PlatformError> {
    let valid = store
        .as_str()
        .strip_suffix(STORE_DOMAIN_SUFFIX)
        .is_some_and(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    if valid {
        Ok(())
    } else {
        Err(PlatformError::InvalidStoreDomain(store.to_string()))
    }
}

fn generate_nonce() -> Nonce {
    let mut bytes = [0u8; NONCE_BYTES];
    OsRng.fill_bytes(&mut bytes);

    Nonce::from(hex::encode(bytes))
}

fn access_token(value: String) -> Result<AccessToken, PlatformError> {
    if value.is_empty() {
        return Err(PlatformError::UnexpectedResponse(
            "platform returned an empty access token".to_string(),
        ));
    }

    Ok(AccessToken::from(value))
}

#[derive(Serialize)]
struct AuthorizationCodeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct AuthorizationCodeResponse {
    access_token: String,
    scope: Option<String>,
}

#[derive(Serialize)]
struct TokenExchangeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
    subject_token: &'a str,
    subject_token_type: &'a str,
}

#[derive(Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    expires_in: u64,
}

#[derive(Serialize)]
struct WebhookRequest<'a> {
    webhook: Webhook<'a>,
}

#[derive(Serialize)]
struct Webhook<'a> {
    topic: &'a str,
    address: &'a str,
    format: &'a str,
}
