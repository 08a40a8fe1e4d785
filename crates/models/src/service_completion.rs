use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{service_request, validate};

/// Shown when a worker completes a job without uploading evidence.
pub const PLACEHOLDER_PHOTO: &str = "https://via.placeholder.com/150";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_completion")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_request_id: Uuid,
    /// `completed` or `pending`
    pub completion_status: String,
    pub completion_photo: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ServiceRequest }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceRequest => Entity::belongs_to(service_request::Entity)
                .from(Column::ServiceRequestId)
                .to(service_request::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Completed,
    Pending,
}

impl CompletionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionStatus::Completed => "completed",
            CompletionStatus::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ModelError> {
        match s {
            "completed" => Ok(CompletionStatus::Completed),
            "pending" => Ok(CompletionStatus::Pending),
            other => Err(ModelError::Validation(format!("unknown completion status: {other}"))),
        }
    }
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    service_request_id: Uuid,
    status: CompletionStatus,
    photo: &str,
) -> Result<Model, ModelError> {
    validate::required("completion photo", photo)?;
    validate::max_chars("completion photo", photo, 1024)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        service_request_id: Set(service_request_id),
        completion_status: Set(status.as_str().to_string()),
        completion_photo: Set(photo.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::db)
}
