use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Public view of a worker. Never carries the password hash or OTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub is_verified: bool,
    pub is_approved: bool,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// Worker with credentials, only handed to the auth flow.
#[derive(Debug, Clone)]
pub struct WorkerAccount {
    pub profile: WorkerProfile,
    pub password_hash: String,
    pub otp: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
}

impl WorkerAccount {
    pub fn id(&self) -> Uuid { self.profile.id }
}

#[derive(Debug, Clone)]
pub struct NewWorkerAccount {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub otp: String,
    pub otp_expires_at: DateTime<Utc>,
}

/// Partial profile edit. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub image: Option<String>,
}

impl ProfileUpdate {
    /// Validate present fields and return them trimmed, with the email lower-cased.
    pub fn normalized(self) -> Result<Self, ServiceError> {
        use models::{validate, worker};

        let full_name = match self.full_name {
            Some(v) => {
                worker::validate_full_name(&v)?;
                Some(v.trim().to_string())
            }
            None => None,
        };
        let email = match self.email {
            Some(v) => {
                worker::validate_email(&v)?;
                Some(validate::normalize_email(&v))
            }
            None => None,
        };
        let mobile_number = match self.mobile_number {
            Some(v) => {
                worker::validate_mobile_number(&v)?;
                Some(v.trim().to_string())
            }
            None => None,
        };
        let image = match self.image {
            Some(v) => {
                worker::validate_image(v.trim())?;
                Some(v.trim().to_string())
            }
            None => None,
        };
        Ok(Self { full_name, email, mobile_number, image })
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.mobile_number.is_none() && self.image.is_none()
    }
}

impl From<models::worker::Model> for WorkerAccount {
    fn from(m: models::worker::Model) -> Self {
        Self {
            profile: WorkerProfile {
                id: m.id,
                full_name: m.full_name,
                email: m.email,
                mobile_number: m.mobile_number,
                is_verified: m.is_verified,
                is_approved: m.is_approved,
                image: m.image,
                created_at: m.created_at.with_timezone(&Utc),
            },
            password_hash: m.password_hash,
            otp: m.otp,
            otp_expires_at: m.otp_expires_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}
