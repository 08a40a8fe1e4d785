use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use models::{service_completion, service_request, user};

use super::domain::{CompletionRecord, CompletionStatus, Customer, RequestStatus, ScheduleEntry, ServiceRequestView};
use super::repository::{ensure_transition, RequestRepository};
use crate::errors::ServiceError;

pub struct SeaOrmRequestRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl RequestRepository for SeaOrmRequestRepository {
    async fn find(&self, id: Uuid) -> Result<Option<ServiceRequestView>, ServiceError> {
        let found = service_request::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)?;
        found.map(ServiceRequestView::try_from).transpose()
    }

    async fn pending_in_categories(&self, categories: &[String]) -> Result<Vec<ServiceRequestView>, ServiceError> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }
        let rows = service_request::Entity::find()
            .filter(service_request::Column::Status.eq(RequestStatus::Pending.as_str()))
            .filter(service_request::Column::Category.is_in(categories.iter().cloned()))
            .order_by_asc(service_request::Column::DateTime)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        rows.into_iter().map(ServiceRequestView::try_from).collect()
    }

    async fn accepted_for_worker(&self, worker_id: Uuid) -> Result<Vec<ScheduleEntry>, ServiceError> {
        let rows = service_request::Entity::find()
            .filter(service_request::Column::Status.eq(RequestStatus::Accepted.as_str()))
            .filter(service_request::Column::ServiceProviderId.eq(worker_id))
            .order_by_asc(service_request::Column::DateTime)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        rows.into_iter()
            .map(|(req, customer)| {
                let view = ServiceRequestView::try_from(req)?;
                Ok(ScheduleEntry {
                    id: view.id,
                    user_id: view.user_id,
                    username: customer.map(|c| c.username).unwrap_or_default(),
                    category: view.category,
                    date_time: view.date_time,
                    duration: view.duration,
                    status: view.status,
                })
            })
            .collect()
    }

    async fn transition(
        &self,
        id: Uuid,
        from: RequestStatus,
        to: RequestStatus,
        provider: Option<Uuid>,
    ) -> Result<bool, ServiceError> {
        ensure_transition(from, to)?;
        let mut update = service_request::Entity::update_many()
            .col_expr(service_request::Column::Status, Expr::value(to.as_str()))
            .col_expr(service_request::Column::UpdatedAt, Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())));
        if let Some(p) = provider {
            update = update.col_expr(service_request::Column::ServiceProviderId, Expr::value(p));
        }
        let res = update
            .filter(service_request::Column::Id.eq(id))
            .filter(service_request::Column::Status.eq(from.as_str()))
            .exec(&self.db)
            .await
            .map_err(ServiceError::db)?;
        debug!(request_id = %id, %from, %to, rows = res.rows_affected, "conditional status update");
        Ok(res.rows_affected == 1)
    }

    async fn complete(&self, id: Uuid, worker_id: Uuid, photo: &str) -> Result<Option<CompletionRecord>, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let res = service_request::Entity::update_many()
            .col_expr(service_request::Column::Status, Expr::value(RequestStatus::Completed.as_str()))
            .col_expr(service_request::Column::UpdatedAt, Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())))
            .filter(service_request::Column::Id.eq(id))
            .filter(service_request::Column::Status.eq(RequestStatus::Accepted.as_str()))
            .filter(service_request::Column::ServiceProviderId.eq(worker_id))
            .exec(&txn)
            .await
            .map_err(ServiceError::db)?;
        if res.rows_affected == 0 {
            txn.rollback().await.map_err(ServiceError::db)?;
            return Ok(None);
        }
        let created = match service_completion::create(&txn, id, CompletionStatus::Completed, photo).await {
            Ok(created) => created,
            Err(e) => {
                txn.rollback().await.map_err(ServiceError::db)?;
                return Err(e.into());
            }
        };
        txn.commit().await.map_err(ServiceError::db)?;
        Ok(Some(created.try_into()?))
    }

    async fn find_customer(&self, user_id: Uuid) -> Result<Option<Customer>, ServiceError> {
        let found = user::Entity::find_by_id(user_id).one(&self.db).await.map_err(ServiceError::db)?;
        Ok(found.map(Customer::from))
    }
}
