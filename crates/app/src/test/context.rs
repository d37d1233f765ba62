//! Test context for service-level integration tests.

use crate::domain::stores::PgStoresService;

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub stores: PgStoresService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let db = TestDb::new().await;

        Self {
            stores: PgStoresService::new(db.pool().clone()),
            db,
        }
    }
}
