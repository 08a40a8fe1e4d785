use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use models::service_completion::CompletionStatus;
pub use models::service_request::RequestStatus;

use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub date_time: DateTime<Utc>,
    pub duration: String,
    pub status: RequestStatus,
    pub service_provider_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// An accepted job on the worker's calendar, labelled with the customer's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub category: String,
    pub date_time: DateTime<Utc>,
    pub duration: String,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub id: Uuid,
    pub service_request_id: Uuid,
    pub completion_status: CompletionStatus,
    pub completion_photo: String,
}

impl TryFrom<models::service_request::Model> for ServiceRequestView {
    type Error = ServiceError;

    fn try_from(m: models::service_request::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            status: m.status()?,
            id: m.id,
            user_id: m.user_id,
            category: m.category,
            date_time: m.date_time.with_timezone(&Utc),
            duration: m.duration,
            service_provider_id: m.service_provider_id,
            created_at: m.created_at.with_timezone(&Utc),
        })
    }
}

impl TryFrom<models::service_completion::Model> for CompletionRecord {
    type Error = ServiceError;

    fn try_from(m: models::service_completion::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            completion_status: CompletionStatus::parse(&m.completion_status)?,
            id: m.id,
            service_request_id: m.service_request_id,
            completion_photo: m.completion_photo,
        })
    }
}

impl From<models::user::Model> for Customer {
    fn from(m: models::user::Model) -> Self {
        Self { id: m.id, username: m.username, email: m.email }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_view_wire_format() {
        let now = Utc::now();
        let v = ServiceRequestView {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            category: "Cleaning".into(),
            date_time: now,
            duration: "3 hours".into(),
            status: RequestStatus::Pending,
            service_provider_id: None,
            created_at: now,
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json.get("serviceProviderId").unwrap().is_null());
        assert!(json.get("dateTime").is_some());
    }
}
