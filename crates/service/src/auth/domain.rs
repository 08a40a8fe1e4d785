use serde::{Deserialize, Serialize};

use crate::worker::domain::WorkerProfile;

/// Signup input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupInput {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpInput {
    pub email: String,
    pub otp: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Issued after OTP verification or login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub worker: WorkerProfile,
    pub token: String,
}
