use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use models::{listing, sub_service};

use super::domain::{NewSubService, ServiceListing, SubService};
use super::repository::CatalogRepository;
use crate::errors::ServiceError;

pub struct SeaOrmCatalogRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn create_listing(&self, worker_id: Uuid, new: listing::NewListing) -> Result<ServiceListing, ServiceError> {
        let created = listing::create(&self.db, worker_id, new).await?;
        Ok(created.into())
    }

    async fn listings_by_worker(&self, worker_id: Uuid) -> Result<Vec<ServiceListing>, ServiceError> {
        let rows = listing::Entity::find()
            .filter(listing::Column::WorkerId.eq(worker_id))
            .order_by_desc(listing::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        Ok(rows.into_iter().map(ServiceListing::from).collect())
    }

    async fn categories_for_worker(&self, worker_id: Uuid) -> Result<Vec<String>, ServiceError> {
        listing::Entity::find()
            .select_only()
            .column(listing::Column::Category)
            .distinct()
            .filter(listing::Column::WorkerId.eq(worker_id))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(ServiceError::db)
    }

    async fn approve_listing(&self, id: Uuid) -> Result<Option<ServiceListing>, ServiceError> {
        let Some(found) = listing::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)? else {
            return Ok(None);
        };
        let mut am: listing::ActiveModel = found.into();
        am.is_approved = Set(true);
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await.map_err(ServiceError::db)?;
        Ok(Some(updated.into()))
    }

    async fn sub_services(&self) -> Result<Vec<SubService>, ServiceError> {
        let rows = sub_service::Entity::find()
            .order_by_asc(sub_service::Column::Category)
            .order_by_asc(sub_service::Column::Name)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        Ok(rows.into_iter().map(SubService::from).collect())
    }

    async fn create_sub_service(&self, new: NewSubService) -> Result<SubService, ServiceError> {
        let created = sub_service::create(&self.db, &new.name, &new.category, new.price).await?;
        Ok(created.into())
    }
}
