use thiserror::Error;

use crate::errors::ServiceError;
use crate::mail::MailError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("worker already exists")]
    Conflict,
    #[error("worker not found")]
    NotFound,
    #[error("Please verify your email first")]
    Unverified,
    #[error("email already verified")]
    AlreadyVerified,
    #[error("Invalid or expired OTP")]
    InvalidOtp,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("mail error: {0}")]
    Mail(#[from] MailError),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::Unauthorized => 1004,
            AuthError::Unverified => 1005,
            AuthError::InvalidOtp => 1006,
            AuthError::AlreadyVerified => 1007,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Mail(_) => 1103,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<ServiceError> for AuthError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => AuthError::Validation(msg),
            ServiceError::Model(models::errors::ModelError::Validation(msg)) => AuthError::Validation(msg),
            ServiceError::Conflict(_) => AuthError::Conflict,
            ServiceError::NotFound(_) => AuthError::NotFound,
            ServiceError::Mail(e) => AuthError::Mail(e),
            other => AuthError::Repository(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            AuthError::Validation(String::new()),
            AuthError::Conflict,
            AuthError::NotFound,
            AuthError::Unauthorized,
            AuthError::Unverified,
            AuthError::InvalidOtp,
            AuthError::AlreadyVerified,
            AuthError::HashError(String::new()),
            AuthError::TokenError(String::new()),
            AuthError::Mail(MailError::Transport(String::new())),
            AuthError::Repository(String::new()),
        ];
        let mut codes: Vec<u16> = all.iter().map(AuthError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn service_errors_map_onto_auth_errors() {
        assert!(matches!(AuthError::from(ServiceError::Conflict("x".into())), AuthError::Conflict));
        assert!(matches!(AuthError::from(ServiceError::not_found("worker")), AuthError::NotFound));
        assert!(matches!(
            AuthError::from(ServiceError::Model(models::errors::ModelError::Validation("bad".into()))),
            AuthError::Validation(_)
        ));
        assert!(matches!(AuthError::from(ServiceError::Db("down".into())), AuthError::Repository(_)));
    }
}
