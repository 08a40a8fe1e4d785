use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{CompletionRecord, Customer, RequestStatus, ScheduleEntry, ServiceRequestView};
use crate::errors::ServiceError;

#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<ServiceRequestView>, ServiceError>;
    async fn pending_in_categories(&self, categories: &[String]) -> Result<Vec<ServiceRequestView>, ServiceError>;
    async fn accepted_for_worker(&self, worker_id: Uuid) -> Result<Vec<ScheduleEntry>, ServiceError>;

    /// Move `id` from `from` to `to`, optionally recording the provider.
    /// Returns false when the row was no longer in `from`.
    async fn transition(
        &self,
        id: Uuid,
        from: RequestStatus,
        to: RequestStatus,
        provider: Option<Uuid>,
    ) -> Result<bool, ServiceError>;

    /// Atomically mark an accepted request owned by `worker_id` completed and
    /// record the completion. `None` when the request was not in that state.
    async fn complete(&self, id: Uuid, worker_id: Uuid, photo: &str) -> Result<Option<CompletionRecord>, ServiceError>;

    async fn find_customer(&self, user_id: Uuid) -> Result<Option<Customer>, ServiceError>;
}

/// Refuse status pairs outside the request lifecycle before touching storage.
pub(crate) fn ensure_transition(from: RequestStatus, to: RequestStatus) -> Result<(), ServiceError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!("cannot move a service request from {from} to {to}")))
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::requests::domain::CompletionStatus;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockRequestRepository {
        requests: Mutex<HashMap<Uuid, ServiceRequestView>>,
        customers: Mutex<HashMap<Uuid, Customer>>,
        completions: Mutex<Vec<CompletionRecord>>,
        race_lost: AtomicBool,
    }

    impl MockRequestRepository {
        pub fn add_customer(&self, username: &str, email: &str) -> Customer {
            let c = Customer { id: Uuid::new_v4(), username: username.into(), email: email.into() };
            self.customers.lock().unwrap().insert(c.id, c.clone());
            c
        }

        /// Seed a pending request, as the customer app would.
        pub fn add_request(&self, user_id: Uuid, category: &str, date_time: DateTime<Utc>) -> ServiceRequestView {
            let r = ServiceRequestView {
                id: Uuid::new_v4(),
                user_id,
                category: category.into(),
                date_time,
                duration: "2 hours".into(),
                status: RequestStatus::Pending,
                service_provider_id: None,
                created_at: Utc::now(),
            };
            self.requests.lock().unwrap().insert(r.id, r.clone());
            r
        }

        /// Make the next `transition` report that another writer moved the row first.
        pub fn lose_next_race(&self) {
            self.race_lost.store(true, Ordering::SeqCst);
        }

        pub fn completions(&self) -> Vec<CompletionRecord> {
            self.completions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RequestRepository for MockRequestRepository {
        async fn find(&self, id: Uuid) -> Result<Option<ServiceRequestView>, ServiceError> {
            Ok(self.requests.lock().unwrap().get(&id).cloned())
        }

        async fn pending_in_categories(&self, categories: &[String]) -> Result<Vec<ServiceRequestView>, ServiceError> {
            let mut found: Vec<_> = self
                .requests
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.status == RequestStatus::Pending && categories.contains(&r.category))
                .cloned()
                .collect();
            found.sort_by_key(|r| r.date_time);
            Ok(found)
        }

        async fn accepted_for_worker(&self, worker_id: Uuid) -> Result<Vec<ScheduleEntry>, ServiceError> {
            let customers = self.customers.lock().unwrap();
            let mut found: Vec<_> = self
                .requests
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.status == RequestStatus::Accepted && r.service_provider_id == Some(worker_id))
                .map(|r| ScheduleEntry {
                    id: r.id,
                    user_id: r.user_id,
                    username: customers.get(&r.user_id).map(|c| c.username.clone()).unwrap_or_default(),
                    category: r.category.clone(),
                    date_time: r.date_time,
                    duration: r.duration.clone(),
                    status: r.status,
                })
                .collect();
            found.sort_by_key(|e| e.date_time);
            Ok(found)
        }

        async fn transition(
            &self,
            id: Uuid,
            from: RequestStatus,
            to: RequestStatus,
            provider: Option<Uuid>,
        ) -> Result<bool, ServiceError> {
            ensure_transition(from, to)?;
            if self.race_lost.swap(false, Ordering::SeqCst) {
                return Ok(false);
            }
            let mut requests = self.requests.lock().unwrap();
            match requests.get_mut(&id) {
                Some(r) if r.status == from => {
                    r.status = to;
                    if provider.is_some() {
                        r.service_provider_id = provider;
                    }
                    Ok(true)
                }
                _ => Ok(false),
            }
        }

        async fn complete(&self, id: Uuid, worker_id: Uuid, photo: &str) -> Result<Option<CompletionRecord>, ServiceError> {
            let mut requests = self.requests.lock().unwrap();
            match requests.get_mut(&id) {
                Some(r) if r.status == RequestStatus::Accepted && r.service_provider_id == Some(worker_id) => {
                    r.status = RequestStatus::Completed;
                    let record = CompletionRecord {
                        id: Uuid::new_v4(),
                        service_request_id: id,
                        completion_status: CompletionStatus::Completed,
                        completion_photo: photo.to_string(),
                    };
                    self.completions.lock().unwrap().push(record.clone());
                    Ok(Some(record))
                }
                _ => Ok(None),
            }
        }

        async fn find_customer(&self, user_id: Uuid) -> Result<Option<Customer>, ServiceError> {
            Ok(self.customers.lock().unwrap().get(&user_id).cloned())
        }
    }
}
