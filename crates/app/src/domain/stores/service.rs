//! Stores service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;

use crate::domain::stores::{
    data::{NewStore, StoreUpdate},
    errors::StoresServiceError,
    records::{StoreName, StoreRecord, StoreUuid},
    repository::PgStoresRepository,
};

#[derive(Debug, Clone)]
pub struct PgStoresService {
    repository: PgStoresRepository,
}

impl PgStoresService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgStoresRepository::new(pool),
        }
    }
}

#[async_trait]
impl StoresService for PgStoresService {
    async fn get_store(&self, name: &StoreName) -> Result<Option<StoreRecord>, StoresServiceError> {
        self.repository.get_store(name).await.map_err(Into::into)
    }

    async fn create_store(&self, store: NewStore) -> Result<StoreRecord, StoresServiceError> {
        let created = self
            .repository
            .create_store(StoreUuid::new(), store)
            .await?;

        debug!(store = %created.name, uuid = %created.uuid, "created store record");

        Ok(created)
    }

    async fn update_store(
        &self,
        name: &StoreName,
        update: StoreUpdate,
    ) -> Result<StoreRecord, StoresServiceError> {
        let updated = self.repository.update_store(name, update).await?;

        debug!(
            store = %updated.name,
            installed = updated.installed,
            "updated store record"
        );

        Ok(updated)
    }

    async fn delete_store(&self, name: &StoreName) -> Result<(), StoresServiceError> {
        let rows_affected = self.repository.delete_store(name).await?;

        if rows_affected == 0 {
            return Err(StoresServiceError::NotFound);
        }

        debug!(store = %name, "soft-deleted store record");

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Store persistence operations.
///
/// Every read ignores soft-deleted records.
pub trait StoresService: Send + Sync {
    /// Fetch the live record for `name`; `None` when there is none.
    async fn get_store(&self, name: &StoreName) -> Result<Option<StoreRecord>, StoresServiceError>;

    /// Create a new live record with a freshly assigned identifier.
    async fn create_store(&self, store: NewStore) -> Result<StoreRecord, StoresServiceError>;

    /// Replace the mutable fields of the live record for `name`.
    async fn update_store(
        &self,
        name: &StoreName,
        update: StoreUpdate,
    ) -> Result<StoreRecord, StoresServiceError>;

    /// Soft-delete the live record for `name`.
    async fn delete_store(&self, name: &StoreName) -> Result<(), StoresServiceError>;
}
