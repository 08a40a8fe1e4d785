use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{CompletionRecord, RequestStatus, ScheduleEntry, ServiceRequestView};
use super::repository::RequestRepository;
use crate::catalog::repository::CatalogRepository;
use crate::errors::ServiceError;
use crate::mail::{Email, Mailer};

pub const ACCEPTED_SUBJECT: &str = "Service Request Accepted";
pub const ALREADY_PROCESSED: &str = "Service request already processed";
pub const NOT_ACCEPTED: &str = "Service request is not accepted";
pub use models::service_completion::PLACEHOLDER_PHOTO;

pub struct RequestService {
    requests: Arc<dyn RequestRepository>,
    catalog: Arc<dyn CatalogRepository>,
    mailer: Arc<dyn Mailer>,
    portal_url: String,
}

impl RequestService {
    pub fn new(
        requests: Arc<dyn RequestRepository>,
        catalog: Arc<dyn CatalogRepository>,
        mailer: Arc<dyn Mailer>,
        portal_url: impl Into<String>,
    ) -> Self {
        let portal_url = portal_url.into().trim_end_matches('/').to_string();
        Self { requests, catalog, mailer, portal_url }
    }

    /// Pending requests in any category the worker lists a service under.
    #[instrument(skip(self))]
    pub async fn notifications(&self, worker_id: Uuid) -> Result<Vec<ServiceRequestView>, ServiceError> {
        let categories = self.catalog.categories_for_worker(worker_id).await?;
        if categories.is_empty() {
            return Ok(Vec::new());
        }
        self.requests.pending_in_categories(&categories).await
    }

    /// Claim a pending request. The customer is emailed; a mail failure is
    /// logged and does not undo the acceptance.
    #[instrument(skip(self))]
    pub async fn accept(&self, worker_id: Uuid, request_id: Uuid) -> Result<ServiceRequestView, ServiceError> {
        let mut request = self.requests.find(request_id).await?.ok_or_else(|| ServiceError::not_found("service request"))?;
        if !request.status.can_transition_to(RequestStatus::Accepted) {
            return Err(ServiceError::Conflict(ALREADY_PROCESSED.into()));
        }
        let applied = self
            .requests
            .transition(request_id, RequestStatus::Pending, RequestStatus::Accepted, Some(worker_id))
            .await?;
        if !applied {
            return Err(ServiceError::Conflict(ALREADY_PROCESSED.into()));
        }
        request.status = RequestStatus::Accepted;
        request.service_provider_id = Some(worker_id);
        info!(service = "requests", event = "request_accepted", request_id = %request_id, worker_id = %worker_id);

        self.notify_customer(&request).await;
        Ok(request)
    }

    async fn notify_customer(&self, request: &ServiceRequestView) {
        let customer = match self.requests.find_customer(request.user_id).await {
            Ok(Some(c)) => c,
            Ok(None) => {
                warn!(request_id = %request.id, user_id = %request.user_id, "customer missing, skipping email");
                return;
            }
            Err(e) => {
                warn!(request_id = %request.id, error = %e, "customer lookup failed, skipping email");
                return;
            }
        };
        let body = format!(
            "Your service request has been accepted by a service provider. Please check it out: {}/gwoc",
            self.portal_url
        );
        if let Err(e) = self.mailer.send(Email::new(customer.email, ACCEPTED_SUBJECT, body)).await {
            warn!(service = "requests", event = "accept_email_failed", request_id = %request.id, error = %e);
        }
    }

    pub async fn schedule(&self, worker_id: Uuid) -> Result<Vec<ScheduleEntry>, ServiceError> {
        self.requests.accepted_for_worker(worker_id).await
    }

    /// Mark an accepted job done. `raw_id` may carry stray whitespace; a
    /// missing or blank photo falls back to [`PLACEHOLDER_PHOTO`].
    #[instrument(skip(self, photo))]
    pub async fn complete(
        &self,
        worker_id: Uuid,
        raw_id: &str,
        photo: Option<String>,
    ) -> Result<CompletionRecord, ServiceError> {
        let request_id = Uuid::parse_str(raw_id.trim())
            .map_err(|_| ServiceError::Validation("invalid service request id".into()))?;
        let photo = photo
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_PHOTO.to_string());

        let request = self.requests.find(request_id).await?.ok_or_else(|| ServiceError::not_found("service request"))?;
        if !request.status.can_transition_to(RequestStatus::Completed) {
            return Err(ServiceError::Conflict(NOT_ACCEPTED.into()));
        }
        if request.service_provider_id != Some(worker_id) {
            return Err(ServiceError::Forbidden("service request is assigned to another worker".into()));
        }

        let record = self
            .requests
            .complete(request_id, worker_id, &photo)
            .await?
            .ok_or_else(|| ServiceError::Conflict(NOT_ACCEPTED.into()))?;
        info!(service = "requests", event = "request_completed", request_id = %request_id, worker_id = %worker_id);
        Ok(record)
    }
}
