use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use common::types::Message;
use service::auth::domain::{LoginInput, SignupInput, VerifyOtpInput};
use service::auth::Claims;
use service::worker::domain::WorkerProfile;

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::state::ServerState;

pub const TOKEN_COOKIE: &str = "token";

/// Identity of the caller, inserted by [`require_worker`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthWorker {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailInput {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenInput {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SessionOutput {
    pub token: String,
    pub worker: WorkerProfile,
}

#[derive(Debug, Serialize)]
pub struct VerifiedOutput {
    pub message: String,
    pub token: String,
    pub worker: WorkerProfile,
}

#[derive(Debug, Serialize)]
pub struct TokenStatus {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<Claims>,
}

#[utoipa::path(post, path = "/api/auth/signup", tag = "auth", request_body = crate::openapi::SignupRequest, responses((status = 201, description = "OTP sent", body = crate::openapi::MessageResponse), (status = 400, description = "Bad Request", body = crate::errors::ErrorBody), (status = 409, description = "Worker already exists", body = crate::errors::ErrorBody), (status = 502, description = "Email could not be sent", body = crate::errors::ErrorBody)))]
pub async fn signup(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<SignupInput>,
) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    state.auth.signup(input).await?;
    Ok((StatusCode::CREATED, Json(Message::new("OTP sent to email"))))
}

#[utoipa::path(post, path = "/api/auth/verify-otp", tag = "auth", request_body = crate::openapi::VerifyOtpRequest, responses((status = 200, description = "Verified", body = crate::openapi::VerifiedResponse), (status = 400, description = "Invalid or expired OTP", body = crate::errors::ErrorBody), (status = 404, description = "Worker not found", body = crate::errors::ErrorBody)))]
pub async fn verify_otp(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<VerifyOtpInput>,
) -> Result<Json<VerifiedOutput>, JsonApiError> {
    let session = state.auth.verify_otp(input).await?;
    Ok(Json(VerifiedOutput {
        message: "Email verified successfully".into(),
        token: session.token,
        worker: session.worker,
    }))
}

#[utoipa::path(post, path = "/api/auth/resend-otp", tag = "auth", request_body = crate::openapi::EmailRequest, responses((status = 200, description = "OTP resent", body = crate::openapi::MessageResponse), (status = 400, description = "Already verified", body = crate::errors::ErrorBody), (status = 404, description = "Worker not found", body = crate::errors::ErrorBody)))]
pub async fn resend_otp(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<EmailInput>,
) -> Result<Json<Message>, JsonApiError> {
    state.auth.resend_otp(&input.email).await?;
    Ok(Json(Message::new("OTP resent to email")))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in; sets the `token` cookie", body = crate::openapi::SessionResponse), (status = 401, description = "Invalid credentials", body = crate::errors::ErrorBody), (status = 403, description = "Email not verified", body = crate::errors::ErrorBody), (status = 404, description = "Worker not found", body = crate::errors::ErrorBody)))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<(CookieJar, Json<SessionOutput>), JsonApiError> {
    let session = state.auth.login(input).await?;
    let mut cookie = Cookie::new(TOKEN_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);
    Ok((jar, Json(SessionOutput { token: session.token, worker: session.worker })))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build(TOKEN_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/auth/verify-token", tag = "auth", request_body = crate::openapi::TokenRequest, responses((status = 200, description = "Token is valid", body = crate::openapi::TokenStatusResponse), (status = 401, description = "Token is invalid or expired", body = crate::openapi::TokenStatusResponse)))]
pub async fn verify_token(State(state): State<ServerState>, JsonBody(input): JsonBody<TokenInput>) -> Response {
    match state.auth.verify_token(&input.token) {
        Ok(claims) => Json(TokenStatus { valid: true, claims: Some(claims) }).into_response(),
        Err(_) => (StatusCode::UNAUTHORIZED, Json(json!({ "valid": false }))).into_response(),
    }
}

/// Bearer token from `Authorization`, falling back to the `token` cookie.
fn extract_token(req: &Request) -> Result<String, JsonApiError> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        let value = value.to_str().map_err(|_| JsonApiError::unauthorized("Invalid Authorization header"))?;
        return match value.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => Ok(t.trim().to_string()),
            _ => Err(JsonApiError::unauthorized("Invalid Authorization header")),
        };
    }
    let jar = CookieJar::from_headers(req.headers());
    match jar.get(TOKEN_COOKIE) {
        Some(c) if !c.value().is_empty() => Ok(c.value().to_string()),
        _ => Err(JsonApiError::unauthorized("Authentication required")),
    }
}

/// Middleware: require a valid worker token and attach [`AuthWorker`] to the request.
pub async fn require_worker(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let token = extract_token(&req).map_err(|e| {
        tracing::warn!(path = %path, "missing or malformed credentials");
        e
    })?;
    let claims = state.auth.verify_token(&token).map_err(|e| {
        tracing::warn!(path = %path, err = %e, "token validation failed");
        JsonApiError::unauthorized("Invalid or expired token")
    })?;
    req.extensions_mut().insert(AuthWorker { id: claims.worker_id, email: claims.email });
    Ok(next.run(req).await)
}
