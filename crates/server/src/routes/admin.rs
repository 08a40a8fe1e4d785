use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use service::catalog::domain::{NewSubService, ServiceListing, SubService};
use service::worker::domain::WorkerProfile;

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::state::ServerState;

pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

#[derive(Debug, Deserialize)]
pub struct ApproveWorkerInput {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveServiceInput {
    pub service_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct WorkerApproved {
    pub message: String,
    pub worker: WorkerProfile,
}

#[derive(Debug, Serialize)]
pub struct ServiceApproved {
    pub message: String,
    pub service: ServiceListing,
}

#[utoipa::path(post, path = "/api/worker/approve", tag = "admin", security(("admin_key" = [])), request_body = crate::openapi::EmailRequest, responses((status = 200, description = "Approved", body = crate::openapi::WorkerApprovedResponse), (status = 401, description = "Bad admin key", body = crate::errors::ErrorBody), (status = 404, description = "Worker not found", body = crate::errors::ErrorBody)))]
pub async fn approve_worker(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<ApproveWorkerInput>,
) -> Result<Json<WorkerApproved>, JsonApiError> {
    let worker = state.workers.approve_by_email(&input.email).await?;
    Ok(Json(WorkerApproved { message: "Worker approved successfully".into(), worker }))
}

#[utoipa::path(post, path = "/api/services/approve", tag = "admin", security(("admin_key" = [])), request_body = crate::openapi::ApproveServiceRequest, responses((status = 200, description = "Approved", body = crate::openapi::ServiceApprovedResponse), (status = 404, description = "Service not found", body = crate::errors::ErrorBody)))]
pub async fn approve_service(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<ApproveServiceInput>,
) -> Result<Json<ServiceApproved>, JsonApiError> {
    let service = state.catalog.approve_listing(input.service_id).await?;
    Ok(Json(ServiceApproved { message: "Service approved successfully".into(), service }))
}

#[utoipa::path(post, path = "/api/admin/subservices", tag = "admin", security(("admin_key" = [])), request_body = crate::openapi::NewSubServiceRequest, responses((status = 201, description = "Created", body = crate::openapi::SubServiceDoc), (status = 400, description = "Bad Request", body = crate::errors::ErrorBody)))]
pub async fn add_sub_service(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<NewSubService>,
) -> Result<(StatusCode, Json<SubService>), JsonApiError> {
    let created = state.catalog.add_sub_service(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Compare without short-circuiting on the first differing byte.
fn keys_match(given: &str, expected: &str) -> bool {
    given.len() == expected.len()
        && given.bytes().zip(expected.bytes()).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
}

/// Middleware: require `X-Admin-Key` to equal the configured admin key.
pub async fn require_admin_key(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let Some(expected) = state.admin_api_key.as_deref() else {
        tracing::warn!(path = %req.uri().path(), "admin route called but no admin key is configured");
        return Err(JsonApiError::forbidden("Admin API is disabled"));
    };

    let given = req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or("");
    if given.is_empty() || !keys_match(given, expected) {
        return Err(JsonApiError::unauthorized("Invalid admin key"));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::keys_match;

    #[test]
    fn key_comparison() {
        assert!(keys_match("s3cret", "s3cret"));
        assert!(!keys_match("s3cret", "s3creT"));
        assert!(!keys_match("s3cre", "s3cret"));
    }
}
