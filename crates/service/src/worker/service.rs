use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{ProfileUpdate, WorkerProfile};
use super::repository::WorkerRepository;
use crate::errors::ServiceError;

pub struct WorkerService {
    repo: Arc<dyn WorkerRepository>,
}

impl WorkerService {
    pub fn new(repo: Arc<dyn WorkerRepository>) -> Self { Self { repo } }

    pub async fn get_profile(&self, id: Uuid) -> Result<WorkerProfile, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(|w| w.profile)
            .ok_or_else(|| ServiceError::not_found("worker"))
    }

    /// Apply a partial edit. Moving to an email another worker holds is a conflict.
    #[instrument(skip(self, update), fields(worker_id = %id))]
    pub async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<WorkerProfile, ServiceError> {
        let update = update.normalized()?;
        if update.is_empty() {
            return self.get_profile(id).await;
        }
        if let Some(email) = &update.email {
            if let Some(other) = self.repo.find_by_email(email).await? {
                if other.id() != id {
                    return Err(ServiceError::Conflict("email already in use".into()));
                }
            }
        }
        let updated = self
            .repo
            .update_profile(id, update)
            .await?
            .ok_or_else(|| ServiceError::not_found("worker"))?;
        info!(service = "worker", event = "profile_updated", worker_id = %id);
        Ok(updated.profile)
    }

    #[instrument(skip(self))]
    pub async fn approve_by_email(&self, email: &str) -> Result<WorkerProfile, ServiceError> {
        let email = models::validate::normalize_email(email);
        if email.is_empty() {
            return Err(ServiceError::Validation("email required".into()));
        }
        let approved = self
            .repo
            .set_approved(&email)
            .await?
            .ok_or_else(|| ServiceError::not_found("worker"))?;
        info!(service = "worker", event = "worker_approved", worker_id = %approved.id());
        Ok(approved.profile)
    }
}
