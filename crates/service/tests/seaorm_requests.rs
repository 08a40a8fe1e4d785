//! Request lifecycle against Postgres. Needs `TEST_DATABASE_URL`; skips otherwise.

use anyhow::Result;
use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use models::{service_completion, service_request, user, worker};
use service::errors::ServiceError;
use service::requests::domain::RequestStatus;
use service::requests::repository::RequestRepository;
use service::requests::seaorm::SeaOrmRequestRepository;

async fn setup_test_db() -> Option<DatabaseConnection> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skip: TEST_DATABASE_URL not set");
            return None;
        }
    };
    let db = match models::db::connect_url(&url).await {
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

struct Seeded {
    customer: user::Model,
    workers: Vec<worker::Model>,
    request: service_request::Model,
}

async fn seed(db: &DatabaseConnection, workers: usize) -> Result<Seeded> {
    let tag = Uuid::new_v4().simple().to_string();
    let customer = user::create(db, &format!("cust_{tag}"), &format!("cust_{tag}@example.com"), "$argon2id$v=19$placeholder", "Andheri").await?;
    let mut created = Vec::new();
    for i in 0..workers {
        let w = worker::create(
            db,
            worker::NewWorker {
                full_name: "Ravi Kumar".into(),
                email: format!("pro{i}_{tag}@example.com"),
                mobile_number: "+91 98765 43210".into(),
                password_hash: "$argon2id$v=19$placeholder".into(),
                otp: None,
                otp_expires_at: None,
            },
        )
        .await?;
        created.push(w);
    }
    let request = service_request::create(db, customer.id, "Electrical", Utc::now().into(), "2 hours").await?;
    Ok(Seeded { customer, workers: created, request })
}

async fn cleanup(db: &DatabaseConnection, s: Seeded) -> Result<()> {
    service_completion::Entity::delete_many()
        .filter(service_completion::Column::ServiceRequestId.eq(s.request.id))
        .exec(db)
        .await?;
    service_request::Entity::delete_by_id(s.request.id).exec(db).await?;
    for w in s.workers {
        worker::Entity::delete_by_id(w.id).exec(db).await?;
    }
    user::Entity::delete_by_id(s.customer.id).exec(db).await?;
    Ok(())
}

async fn completions_for(db: &DatabaseConnection, request_id: Uuid) -> Result<usize> {
    Ok(service_completion::Entity::find()
        .filter(service_completion::Column::ServiceRequestId.eq(request_id))
        .all(db)
        .await?
        .len())
}

#[tokio::test]
async fn test_second_accept_does_not_apply() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let s = seed(&db, 2).await?;
    let repo = SeaOrmRequestRepository::new(db.clone());
    let (first, second) = (s.workers[0].id, s.workers[1].id);

    assert!(repo.transition(s.request.id, RequestStatus::Pending, RequestStatus::Accepted, Some(first)).await?);
    assert!(!repo.transition(s.request.id, RequestStatus::Pending, RequestStatus::Accepted, Some(second)).await?);

    let stored = repo.find(s.request.id).await?.expect("request exists");
    assert_eq!(stored.status, RequestStatus::Accepted);
    assert_eq!(stored.service_provider_id, Some(first), "the losing worker is not recorded");

    let backwards = repo.transition(s.request.id, RequestStatus::Accepted, RequestStatus::Pending, None).await;
    assert!(matches!(backwards, Err(ServiceError::Validation(_))));

    cleanup(&db, s).await
}

#[tokio::test]
async fn test_complete_by_other_worker_writes_nothing() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let s = seed(&db, 2).await?;
    let repo = SeaOrmRequestRepository::new(db.clone());
    let (owner, other) = (s.workers[0].id, s.workers[1].id);
    repo.transition(s.request.id, RequestStatus::Pending, RequestStatus::Accepted, Some(owner)).await?;

    assert!(repo.complete(s.request.id, other, "https://cdn.example.com/done.jpg").await?.is_none());
    assert_eq!(completions_for(&db, s.request.id).await?, 0);
    assert_eq!(repo.find(s.request.id).await?.map(|r| r.status), Some(RequestStatus::Accepted));

    let record = repo
        .complete(s.request.id, owner, "https://cdn.example.com/done.jpg")
        .await?
        .expect("owner completes");
    assert_eq!(record.service_request_id, s.request.id);
    assert_eq!(completions_for(&db, s.request.id).await?, 1);
    assert_eq!(repo.find(s.request.id).await?.map(|r| r.status), Some(RequestStatus::Completed));

    // completed is final; a retry neither updates nor inserts
    assert!(repo.complete(s.request.id, owner, "https://cdn.example.com/again.jpg").await?.is_none());
    assert_eq!(completions_for(&db, s.request.id).await?, 1);

    cleanup(&db, s).await
}

#[tokio::test]
async fn test_invalid_photo_rolls_back_status_change() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let s = seed(&db, 1).await?;
    let repo = SeaOrmRequestRepository::new(db.clone());
    let owner = s.workers[0].id;
    repo.transition(s.request.id, RequestStatus::Pending, RequestStatus::Accepted, Some(owner)).await?;

    let too_long = format!("https://cdn.example.com/{}", "x".repeat(1100));
    let err = repo.complete(s.request.id, owner, &too_long).await.unwrap_err();
    assert!(matches!(err, ServiceError::Model(_)));

    assert_eq!(repo.find(s.request.id).await?.map(|r| r.status), Some(RequestStatus::Accepted));
    assert_eq!(completions_for(&db, s.request.id).await?, 0);

    cleanup(&db, s).await
}
