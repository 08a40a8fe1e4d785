use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use models::errors::ModelError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Body of every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// HTTP-facing error: status plus `{ error, message }`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    pub fn unauthorized(message: impl Into<String>) -> Self { Self::new(StatusCode::UNAUTHORIZED, message) }

    pub fn forbidden(message: impl Into<String>) -> Self { Self::new(StatusCode::FORBIDDEN, message) }

    fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let title = self.status.canonical_reason().unwrap_or("Error").to_string();
        let body = ErrorBody { error: title, message: self.message };
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => Self::bad_request(msg),
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, "Worker already exists"),
            AuthError::NotFound => Self::new(StatusCode::NOT_FOUND, "Worker not found"),
            AuthError::Unverified => Self::forbidden(AuthError::Unverified.to_string()),
            AuthError::AlreadyVerified => Self::bad_request("Email already verified"),
            AuthError::InvalidOtp => Self::bad_request(AuthError::InvalidOtp.to_string()),
            AuthError::Unauthorized => Self::unauthorized("Invalid credentials"),
            AuthError::TokenError(_) => Self::unauthorized("Invalid or expired token"),
            AuthError::Mail(e) => {
                error!(error = %e, code = 1103, "mail delivery failed");
                Self::new(StatusCode::BAD_GATEWAY, "Failed to send email")
            }
            other @ (AuthError::HashError(_) | AuthError::Repository(_)) => {
                let code = other.code();
                error!(code, "auth failure");
                Self::internal(other)
            }
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::Model(ModelError::Validation(msg)) => Self::bad_request(msg),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, capitalize(&msg)),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            ServiceError::Forbidden(msg) => Self::forbidden(msg),
            ServiceError::Mail(e) => {
                error!(error = %e, "mail delivery failed");
                Self::new(StatusCode::BAD_GATEWAY, "Failed to send email")
            }
            other @ (ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_))) => Self::internal(other),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error("mailer setup failed: {0}")]
    Mail(#[from] service::mail::MailError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_statuses() {
        let cases = [
            (AuthError::Conflict, StatusCode::CONFLICT),
            (AuthError::NotFound, StatusCode::NOT_FOUND),
            (AuthError::Unverified, StatusCode::FORBIDDEN),
            (AuthError::InvalidOtp, StatusCode::BAD_REQUEST),
            (AuthError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AuthError::TokenError("expired".into()), StatusCode::UNAUTHORIZED),
            (AuthError::Repository("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AuthError::Mail(service::mail::MailError::Transport("refused".into())),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(JsonApiError::from(ServiceError::not_found("worker")).message, "Worker not found");
        assert_eq!(JsonApiError::from(ServiceError::Forbidden("x".into())).status, StatusCode::FORBIDDEN);
        assert_eq!(JsonApiError::from(ServiceError::Conflict("x".into())).status, StatusCode::CONFLICT);
        assert_eq!(
            JsonApiError::from(ServiceError::Model(ModelError::Validation("price cannot be negative".into()))).status,
            StatusCode::BAD_REQUEST
        );
        let internal = JsonApiError::from(ServiceError::Db("connection reset".into()));
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.message, "Server error");
    }
}
