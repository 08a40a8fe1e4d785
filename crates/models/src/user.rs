//! Customer accounts. Owned by the customer-facing app; the worker portal
//! reads them to address notifications and label schedule entries.
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validate;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub area: String,
    pub is_verified: bool,
    /// JSON array of category names
    pub interested_categories: Json,
    pub wallet_coins: i64,
    pub referral_code: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    validate::required("username", username)?;
    validate::max_chars("username", username.trim(), 64)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    username: &str,
    email: &str,
    password_hash: &str,
    area: &str,
) -> Result<Model, ModelError> {
    validate_username(username)?;
    validate::email(email)?;
    validate::required("area", area)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.trim().to_string()),
        email: Set(validate::normalize_email(email)),
        password_hash: Set(password_hash.to_string()),
        area: Set(area.trim().to_string()),
        is_verified: Set(false),
        interested_categories: Set(Json::Array(Vec::new())),
        wallet_coins: Set(0),
        referral_code: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::db)
}
