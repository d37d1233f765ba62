//! Installations service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, debug, field, info, warn};

use crate::{
    domain::stores::{
        StoresService, StoresServiceError,
        data::{NewStore, StoreUpdate},
        records::{StoreName, StoreRecord},
    },
    installations::{InstallationsConfig, InstallationsServiceError},
    platform::{PlatformApi, PlatformError, SessionVerification, StoreClient},
    secrets::{Nonce, SessionToken},
};

#[derive(Clone)]
pub struct DefaultInstallationsService {
    stores: Arc<dyn StoresService>,
    platform: Arc<dyn PlatformApi>,
    config: InstallationsConfig,
}

impl DefaultInstallationsService {
    #[must_use]
    pub fn new(
        stores: Arc<dyn StoresService>,
        platform: Arc<dyn PlatformApi>,
        config: InstallationsConfig,
    ) -> Self {
        Self {
            stores,
            platform,
            config,
        }
    }

    async fn record_nonce(
        &self,
        store: &StoreName,
        existing: Option<StoreRecord>,
        nonce: Nonce,
    ) -> Result<StoreRecord, InstallationsServiceError> {
        let update = StoreUpdate {
            nonce: Some(nonce),
            access_token: None,
            installed: false,
        };

        if existing.is_some() {
            return Ok(self.stores.update_store(store, update).await?);
        }

        let new_store = NewStore {
            name: store.clone(),
            nonce: update.nonce.clone(),
            installed: false,
        };

        match self.stores.create_store(new_store).await {
            Err(StoresServiceError::AlreadyExists) => {
                debug!("store created concurrently, replacing its nonce");
                Ok(self.stores.update_store(store, update).await?)
            }
            result => Ok(result?),
        }
    }

    /// Verify the caller's session and build a client for its store.
    async fn session_client(
        &self,
        session_token: Option<SessionToken>,
    ) -> Result<Arc<dyn StoreClient>, InstallationsServiceError> {
        let token = session_token
            .filter(|token| !token.is_empty())
            .ok_or(InstallationsServiceError::MissingSessionToken)?;

        let store = match self.platform.verify_session(&token) {
            SessionVerification {
                verified: true,
                store: Some(store),
            } => store,
            _ => return Err(InstallationsServiceError::InvalidSession),
        };

        Span::current().record("store", store.as_str());

        self.provision_store(&store).await?;

        Ok(self.platform.with_session_token(&store, &token).await)
    }

    /// Existing live record for `store`, or a new installed one without an
    /// access token.
    async fn provision_store(
        &self,
        store: &StoreName,
    ) -> Result<StoreRecord, InstallationsServiceError> {
        if let Some(record) = self.stores.get_store(store).await? {
            return Ok(record);
        }

        info!("provisioning store from verified session");

        let new_store = NewStore {
            name: store.clone(),
            nonce: None,
            installed: true,
        };

        match self.stores.create_store(new_store).await {
            Err(StoresServiceError::AlreadyExists) => self
                .stores
                .get_store(store)
                .await?
                .ok_or(InstallationsServiceError::NotFound),
            result => Ok(result?),
        }
    }
}

#[async_trait]
impl InstallationsService for DefaultInstallationsService {
    #[tracing::instrument(skip_all, fields(store = %store))]
    async fn handle(
        &self,
        store: &StoreName,
        install_url: &str,
    ) -> Result<String, InstallationsServiceError> {
        let existing = self.stores.get_store(store).await?;

        if existing.as_ref().is_some_and(|record| record.installed) {
            info!("store already installed");

            return Ok(self.config.exit_iframe_url(store));
        }

        let redirect_url = self.config.redirect_callback_url()?;

        let start = self
            .platform
            .begin_install(store, install_url, &redirect_url)
            .await?;

        let record = self.record_nonce(store, existing, start.nonce).await?;

        info!(uuid = %record.uuid, "install started");

        Ok(start.redirect_target)
    }

    #[tracing::instrument(skip_all, fields(store = %store))]
    async fn handle_redirect(
        &self,
        store: &StoreName,
        redirected_url: &str,
    ) -> Result<(), InstallationsServiceError> {
        let record = self
            .stores
            .get_store(store)
            .await?
            .ok_or(InstallationsServiceError::NotFound)?;

        let Some(nonce) = record.nonce.as_ref() else {
            return Err(PlatformError::NonceMismatch.into());
        };

        let access_token = self
            .platform
            .complete_redirect(store, nonce, redirected_url)
            .await?;

        let callback_url = self.config.uninstall_callback_url(store)?;

        match self
            .platform
            .subscribe_uninstall_webhook(store, &callback_url, &access_token)
            .await
        {
            Ok(()) => {}
            Err(PlatformError::WebhookAlreadyRegistered) => {
                warn!("uninstall webhook already registered");
            }
            Err(error) => return Err(error.into()),
        }

        self.stores
            .update_store(
                store,
                StoreUpdate {
                    nonce: None,
                    access_token: Some(access_token),
                    installed: true,
                },
            )
            .await?;

        info!(uuid = %record.uuid, "store installed");

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(store = %store))]
    async fn handle_uninstall(&self, store: &StoreName) -> Result<(), InstallationsServiceError> {
        if self.stores.get_store(store).await?.is_none() {
            return Err(InstallationsServiceError::NotFound);
        }

        self.stores.delete_store(store).await?;

        info!("store uninstalled");

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(store = field::Empty))]
    async fn get_products_count(
        &self,
        session_token: Option<SessionToken>,
    ) -> Result<u64, InstallationsServiceError> {
        let client = self.session_client(session_token).await?;

        Ok(client.products_count().await?)
    }

    #[tracing::instrument(skip_all, fields(store = field::Empty))]
    async fn create_products(
        &self,
        session_token: Option<SessionToken>,
    ) -> Result<usize, InstallationsServiceError> {
        let client = self.session_client(session_token).await?;

        Ok(client.create_products().await?)
    }

    fn verify_webhook(&self, body: &[u8], signature: &str) -> Result<(), InstallationsServiceError> {
        Ok(self.platform.verify_webhook(body, signature)?)
    }

    fn app_url(&self, store: &StoreName) -> String {
        self.config.app_url(store)
    }
}

#[automock]
#[async_trait]
/// Store install lifecycle.
pub trait InstallationsService: Send + Sync {
    /// Start an install for `store`, returning where to redirect the merchant.
    ///
    /// Already installed stores get their exit-iframe URL and nothing is
    /// written.
    async fn handle(
        &self,
        store: &StoreName,
        install_url: &str,
    ) -> Result<String, InstallationsServiceError>;

    /// Finish an install from the platform's redirect.
    ///
    /// The store is only marked installed once the uninstall webhook is in
    /// place.
    async fn handle_redirect(
        &self,
        store: &StoreName,
        redirected_url: &str,
    ) -> Result<(), InstallationsServiceError>;

    /// Soft-delete the store after an uninstall notification.
    async fn handle_uninstall(&self, store: &StoreName) -> Result<(), InstallationsServiceError>;

    async fn get_products_count(
        &self,
        session_token: Option<SessionToken>,
    ) -> Result<u64, InstallationsServiceError>;

    async fn create_products(
        &self,
        session_token: Option<SessionToken>,
    ) -> Result<usize, InstallationsServiceError>;

    /// Check the signature of an inbound webhook delivery.
    fn verify_webhook(&self, body: &[u8], signature: &str) -> Result<(), InstallationsServiceError>;

    /// The app inside the store admin.
    fn app_url(&self, store: &StoreName) -> String;
}
