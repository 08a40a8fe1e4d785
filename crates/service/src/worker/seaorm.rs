use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use models::worker;

use super::domain::{NewWorkerAccount, ProfileUpdate, WorkerAccount};
use super::repository::WorkerRepository;
use crate::errors::ServiceError;

pub struct SeaOrmWorkerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmWorkerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn load(&self, id: Uuid) -> Result<Option<worker::Model>, ServiceError> {
        worker::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)
    }
}

#[async_trait::async_trait]
impl WorkerRepository for SeaOrmWorkerRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<WorkerAccount>, ServiceError> {
        let found = worker::find_by_email(&self.db, email).await?;
        Ok(found.map(WorkerAccount::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkerAccount>, ServiceError> {
        Ok(self.load(id).await?.map(WorkerAccount::from))
    }

    async fn create(&self, new: NewWorkerAccount) -> Result<WorkerAccount, ServiceError> {
        let created = worker::create(
            &self.db,
            worker::NewWorker {
                full_name: new.full_name,
                email: new.email,
                mobile_number: new.mobile_number,
                password_hash: new.password_hash,
                otp: Some(new.otp),
                otp_expires_at: Some(new.otp_expires_at.into()),
            },
        )
        .await?;
        Ok(created.into())
    }

    async fn set_otp(&self, id: Uuid, otp: &str, expires_at: DateTime<Utc>) -> Result<(), ServiceError> {
        let mut am: worker::ActiveModel = self.load(id).await?.ok_or_else(|| ServiceError::not_found("worker"))?.into();
        am.otp = Set(Some(otp.to_string()));
        am.otp_expires_at = Set(Some(expires_at.into()));
        am.updated_at = Set(Utc::now().into());
        am.update(&self.db).await.map_err(ServiceError::db)?;
        Ok(())
    }

    async fn mark_verified(&self, id: Uuid) -> Result<WorkerAccount, ServiceError> {
        let mut am: worker::ActiveModel = self.load(id).await?.ok_or_else(|| ServiceError::not_found("worker"))?.into();
        am.is_verified = Set(true);
        am.otp = Set(None);
        am.otp_expires_at = Set(None);
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await.map_err(ServiceError::db)?;
        Ok(updated.into())
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<WorkerAccount>, ServiceError> {
        let Some(found) = self.load(id).await? else { return Ok(None) };
        let mut am: worker::ActiveModel = found.into();
        if let Some(v) = update.full_name { am.full_name = Set(v); }
        if let Some(v) = update.email { am.email = Set(v); }
        if let Some(v) = update.mobile_number { am.mobile_number = Set(v); }
        if let Some(v) = update.image { am.image = Set(v); }
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await.map_err(ServiceError::db)?;
        Ok(Some(updated.into()))
    }

    async fn set_approved(&self, email: &str) -> Result<Option<WorkerAccount>, ServiceError> {
        let Some(found) = worker::find_by_email(&self.db, email).await? else { return Ok(None) };
        let mut am: worker::ActiveModel = found.into();
        am.is_approved = Set(true);
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await.map_err(ServiceError::db)?;
        Ok(Some(updated.into()))
    }
}
