//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::{
    database,
    domain::stores::{PgStoresService, StoresService},
    installations::{DefaultInstallationsService, InstallationsConfig, InstallationsService},
    platform::{PlatformApi, PlatformConfig, PlatformError, ShopifyApi},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),

    #[error("failed to build platform client")]
    Platform(#[source] PlatformError),
}

#[derive(Clone)]
pub struct AppContext {
    pub installations: Arc<dyn InstallationsService>,
}

impl AppContext {
    /// Build application context from a database URL, optionally applying
    /// pending migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or building the platform
    /// client fails.
    pub async fn from_database_url(
        url: &str,
        run_migrations: bool,
        platform: PlatformConfig,
        installations: InstallationsConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Self::new(pool, platform, installations)
    }

    /// Wire services around an existing pool.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform client cannot be built.
    pub fn new(
        pool: PgPool,
        platform: PlatformConfig,
        installations: InstallationsConfig,
    ) -> Result<Self, AppInitError> {
        let stores: Arc<dyn StoresService> = Arc::new(PgStoresService::new(pool));

        let platform: Arc<dyn PlatformApi> =
            Arc::new(ShopifyApi::new(platform).map_err(AppInitError::Platform)?);

        let installations = Arc::new(DefaultInstallationsService::new(
            stores, platform, installations,
        ));

        Ok(Self { installations })
    }
}
