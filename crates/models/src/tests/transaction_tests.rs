use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use super::{setup_test_db, unique_email};
use crate::service_request::{self, RequestStatus};
use crate::{service_completion, user};

async fn seed_request(db: &sea_orm::DatabaseConnection) -> Result<(user::Model, service_request::Model)> {
    let customer = user::create(
        db,
        &format!("txn_{}", Uuid::new_v4().simple()),
        &unique_email("txn"),
        "$argon2id$v=19$placeholder",
        "Bandra",
    )
    .await?;
    let req = service_request::create(db, customer.id, "Electrical", Utc::now().into(), "2 hours").await?;
    Ok((customer, req))
}

#[tokio::test]
async fn test_conditional_update_only_matches_expected_status() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let (customer, req) = seed_request(&db).await?;

    let accept = || {
        service_request::Entity::update_many()
            .col_expr(service_request::Column::Status, Expr::value(RequestStatus::Accepted.as_str()))
            .filter(service_request::Column::Id.eq(req.id))
            .filter(service_request::Column::Status.eq(RequestStatus::Pending.as_str()))
    };
    let first = accept().exec(&db).await?;
    assert_eq!(first.rows_affected, 1);
    let second = accept().exec(&db).await?;
    assert_eq!(second.rows_affected, 0, "already accepted");

    service_request::Entity::delete_by_id(req.id).exec(&db).await?;
    user::Entity::delete_by_id(customer.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_rollback_discards_completion_record() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let (customer, req) = seed_request(&db).await?;

    let txn = db.begin().await?;
    let c = service_completion::create(
        &txn,
        req.id,
        service_completion::CompletionStatus::Completed,
        "https://cdn.example.com/done.jpg",
    )
    .await?;
    txn.rollback().await?;

    assert!(service_completion::Entity::find_by_id(c.id).one(&db).await?.is_none());

    service_request::Entity::delete_by_id(req.id).exec(&db).await?;
    user::Entity::delete_by_id(customer.id).exec(&db).await?;
    Ok(())
}
