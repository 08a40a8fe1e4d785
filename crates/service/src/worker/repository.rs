use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::domain::{NewWorkerAccount, ProfileUpdate, WorkerAccount};
use crate::errors::ServiceError;

/// Persistence for worker accounts. Emails passed in are already normalised.
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<WorkerAccount>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkerAccount>, ServiceError>;
    async fn create(&self, new: NewWorkerAccount) -> Result<WorkerAccount, ServiceError>;

    async fn set_otp(&self, id: Uuid, otp: &str, expires_at: DateTime<Utc>) -> Result<(), ServiceError>;
    /// Mark verified and clear the stored OTP.
    async fn mark_verified(&self, id: Uuid) -> Result<WorkerAccount, ServiceError>;

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<WorkerAccount>, ServiceError>;
    async fn set_approved(&self, email: &str) -> Result<Option<WorkerAccount>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::worker::domain::WorkerProfile;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockWorkerRepository {
        workers: Mutex<HashMap<Uuid, WorkerAccount>>,
    }

    impl MockWorkerRepository {
        /// Insert a verified worker directly, bypassing signup.
        pub fn insert(&self, account: WorkerAccount) {
            self.workers.lock().unwrap().insert(account.id(), account);
        }

        pub fn get(&self, id: Uuid) -> Option<WorkerAccount> {
            self.workers.lock().unwrap().get(&id).cloned()
        }

        /// Force an OTP expiry, for exercising the expired path.
        pub fn expire_otp(&self, id: Uuid) {
            if let Some(w) = self.workers.lock().unwrap().get_mut(&id) {
                w.otp_expires_at = Some(Utc::now() - chrono::Duration::seconds(1));
            }
        }
    }

    #[async_trait]
    impl WorkerRepository for MockWorkerRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<WorkerAccount>, ServiceError> {
            let workers = self.workers.lock().unwrap();
            Ok(workers.values().find(|w| w.profile.email == email).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkerAccount>, ServiceError> {
            Ok(self.get(id))
        }

        async fn create(&self, new: NewWorkerAccount) -> Result<WorkerAccount, ServiceError> {
            let mut workers = self.workers.lock().unwrap();
            if workers.values().any(|w| w.profile.email == new.email) {
                return Err(ServiceError::Conflict("worker already exists".into()));
            }
            let account = WorkerAccount {
                profile: WorkerProfile {
                    id: Uuid::new_v4(),
                    full_name: new.full_name,
                    email: new.email,
                    mobile_number: new.mobile_number,
                    is_verified: false,
                    is_approved: false,
                    image: models::worker::DEFAULT_IMAGE.to_string(),
                    created_at: Utc::now(),
                },
                password_hash: new.password_hash,
                otp: Some(new.otp),
                otp_expires_at: Some(new.otp_expires_at),
            };
            workers.insert(account.id(), account.clone());
            Ok(account)
        }

        async fn set_otp(&self, id: Uuid, otp: &str, expires_at: DateTime<Utc>) -> Result<(), ServiceError> {
            let mut workers = self.workers.lock().unwrap();
            let w = workers.get_mut(&id).ok_or_else(|| ServiceError::not_found("worker"))?;
            w.otp = Some(otp.to_string());
            w.otp_expires_at = Some(expires_at);
            Ok(())
        }

        async fn mark_verified(&self, id: Uuid) -> Result<WorkerAccount, ServiceError> {
            let mut workers = self.workers.lock().unwrap();
            let w = workers.get_mut(&id).ok_or_else(|| ServiceError::not_found("worker"))?;
            w.profile.is_verified = true;
            w.otp = None;
            w.otp_expires_at = None;
            Ok(w.clone())
        }

        async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<WorkerAccount>, ServiceError> {
            let mut workers = self.workers.lock().unwrap();
            let Some(w) = workers.get_mut(&id) else { return Ok(None) };
            if let Some(v) = update.full_name { w.profile.full_name = v; }
            if let Some(v) = update.email { w.profile.email = v; }
            if let Some(v) = update.mobile_number { w.profile.mobile_number = v; }
            if let Some(v) = update.image { w.profile.image = v; }
            Ok(Some(w.clone()))
        }

        async fn set_approved(&self, email: &str) -> Result<Option<WorkerAccount>, ServiceError> {
            let mut workers = self.workers.lock().unwrap();
            let Some(w) = workers.values_mut().find(|w| w.profile.email == email) else { return Ok(None) };
            w.profile.is_approved = true;
            Ok(Some(w.clone()))
        }
    }
}
