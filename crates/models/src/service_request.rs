use std::{fmt, str::FromStr};

use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{user, validate, worker};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub date_time: DateTimeWithTimeZone,
    pub duration: String,
    /// One of [`RequestStatus`], stored as text
    pub status: String,
    pub service_provider_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User, Provider }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Provider => Entity::belongs_to(worker::Entity)
                .from(Column::ServiceProviderId)
                .to(worker::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Completed => "completed",
        }
    }

    /// pending -> accepted | rejected, accepted -> completed. Everything else is refused.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Accepted)
                | (RequestStatus::Pending, RequestStatus::Rejected)
                | (RequestStatus::Accepted, RequestStatus::Completed)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "accepted" => Ok(RequestStatus::Accepted),
            "rejected" => Ok(RequestStatus::Rejected),
            "completed" => Ok(RequestStatus::Completed),
            other => Err(ModelError::Validation(format!("unknown request status: {other}"))),
        }
    }
}

impl Model {
    pub fn status(&self) -> Result<RequestStatus, ModelError> {
        self.status.parse()
    }
}

/// Insert a pending request. Requests normally arrive from the customer app;
/// this exists for seeding and tests.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    category: &str,
    date_time: DateTimeWithTimeZone,
    duration: &str,
) -> Result<Model, ModelError> {
    validate::required("category", category)?;
    validate::required("duration", duration)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        category: Set(category.trim().to_string()),
        date_time: Set(date_time),
        duration: Set(duration.trim().to_string()),
        status: Set(RequestStatus::Pending.as_str().to_string()),
        service_provider_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::db)
}

#[cfg(test)]
mod tests {
    use super::RequestStatus::{self, *};

    #[test]
    fn lifecycle_moves_forward_only() {
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Accepted.can_transition_to(Completed));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Accepted.can_transition_to(Pending));
        assert!(!Accepted.can_transition_to(Accepted));
        assert!(!Completed.can_transition_to(Accepted));
        assert!(!Rejected.can_transition_to(Accepted));
    }

    #[test]
    fn parses_stored_text() {
        for s in [Pending, Accepted, Rejected, Completed] {
            assert_eq!(s.as_str().parse::<RequestStatus>().unwrap(), s);
        }
        assert!("cancelled".parse::<RequestStatus>().is_err());
        assert!("Pending".parse::<RequestStatus>().is_err());
    }
}
