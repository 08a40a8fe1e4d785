use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validate;

pub const DEFAULT_IMAGE: &str = "/images/default-avatar.png";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "worker")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub mobile_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub otp: Option<String>,
    #[serde(skip_serializing)]
    pub otp_expires_at: Option<DateTimeWithTimeZone>,
    /// OTP confirmed
    pub is_verified: bool,
    /// Approved by an admin
    pub is_approved: bool,
    pub image: String,
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

pub fn validate_full_name(name: &str) -> Result<(), ModelError> {
    validate::required("full name", name)?;
    validate::max_chars("full name", name.trim(), 128)
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    validate::email(email)?;
    validate::max_chars("email", email.trim(), 255)
}

pub fn validate_mobile_number(number: &str) -> Result<(), ModelError> {
    validate::required("mobile number", number)?;
    validate::max_chars("mobile number", number.trim(), 32)?;
    let digits = number.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = number.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    if !allowed || !(7..=15).contains(&digits) {
        return Err(ModelError::Validation("invalid mobile number".into()));
    }
    Ok(())
}

pub fn validate_image(image: &str) -> Result<(), ModelError> {
    validate::required("image", image)?;
    validate::max_chars("image", image, 512)
}

/// Fields for a freshly signed-up, unverified worker.
#[derive(Debug, Clone)]
pub struct NewWorker {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub otp: Option<String>,
    pub otp_expires_at: Option<DateTimeWithTimeZone>,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewWorker) -> Result<Model, ModelError> {
    validate_full_name(&new.full_name)?;
    validate_email(&new.email)?;
    validate_mobile_number(&new.mobile_number)?;
    if new.password_hash.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        full_name: Set(new.full_name.trim().to_string()),
        email: Set(validate::normalize_email(&new.email)),
        mobile_number: Set(new.mobile_number.trim().to_string()),
        password_hash: Set(new.password_hash),
        otp: Set(new.otp),
        otp_expires_at: Set(new.otp_expires_at),
        is_verified: Set(false),
        is_approved: Set(false),
        image: Set(DEFAULT_IMAGE.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::db)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(validate::normalize_email(email)))
        .one(db)
        .await
        .map_err(ModelError::db)
}
