//! Database-backed tests. They need a disposable Postgres reachable through
//! `TEST_DATABASE_URL` and skip themselves otherwise.


/// Conditional status updates and transaction rollback
pub mod transaction_tests;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skip: TEST_DATABASE_URL not set");
            return None;
        }
    };
    let db = match crate::db::connect_url(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {e}");
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {e}");
        return None;
    }
    Some(db)
}

pub(crate) fn unique_email(prefix: &str) -> String {
    format!("{prefix}_{}@example.com", uuid::Uuid::new_v4().simple())
}
