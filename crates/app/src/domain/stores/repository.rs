//! Stores Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    domain::stores::{
        data::{NewStore, StoreUpdate},
        records::{StoreName, StoreRecord, StoreUuid},
    },
    secrets::{AccessToken, Nonce},
};

const GET_STORE_SQL: &str = include_str!("sql/get_store.sql");
const CREATE_STORE_SQL: &str = include_str!("sql/create_store.sql");
const UPDATE_STORE_SQL: &str = include_str!("sql/update_store.sql");
const DELETE_STORE_SQL: &str = include_str!("sql/delete_store.sql");

#[derive(Debug, Clone)]
/// PostgreSQL-backed stores repository.
pub(crate) struct PgStoresRepository {
    pool: PgPool,
}

impl PgStoresRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn get_store(
        &self,
        name: &StoreName,
    ) -> Result<Option<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(GET_STORE_SQL)
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_store(
        &self,
        uuid: StoreUuid,
        store: NewStore,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(CREATE_STORE_SQL)
            .bind(uuid.into_uuid())
            .bind(store.name.as_str())
            .bind(store.nonce.as_ref().map(Nonce::expose))
            .bind(None::<String>)
            .bind(store.installed)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn update_store(
        &self,
        name: &StoreName,
        update: StoreUpdate,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(UPDATE_STORE_SQL)
            .bind(name.as_str())
            .bind(update.nonce.as_ref().map(Nonce::expose))
            .bind(update.access_token.as_ref().map(AccessToken::expose))
            .bind(update.installed)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn delete_store(&self, name: &StoreName) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_STORE_SQL)
            .bind(name.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for StoreRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let name: String = row.try_get("name")?;

        let name = StoreName::parse(&name).map_err(|error| sqlx::Error::ColumnDecode {
            index: "name".to_string(),
            source: Box::new(error),
        })?;

        Ok(Self {
            uuid: StoreUuid::from_uuid(row.try_get("uuid")?),
            name,
            nonce: row
                .try_get::<Option<String>, _>("nonce")?
                .filter(|nonce| !nonce.is_empty())
                .map(Nonce::from),
            access_token: row
                .try_get::<Option<String>, _>("access_token")?
                .filter(|token| !token.is_empty())
                .map(AccessToken::from),
            installed: row.try_get("installed")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
