use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use service::requests::domain::{CompletionRecord, ScheduleEntry, ServiceRequestView};

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::routes::auth::AuthWorker;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInput {
    pub request_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteInput {
    /// Kept as text; stray whitespace is trimmed before parsing
    pub service_request_id: String,
    #[serde(default)]
    pub completion_photo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AcceptOutput {
    pub message: String,
    pub request: ServiceRequestView,
}

#[derive(Debug, Serialize)]
pub struct CompleteOutput {
    pub message: String,
    pub completion: CompletionRecord,
}

#[utoipa::path(get, path = "/api/notifications", tag = "requests", security(("bearer" = [])), responses((status = 200, description = "Pending requests in the worker's categories", body = [crate::openapi::ServiceRequestDoc])))]
pub async fn notifications(
    State(state): State<ServerState>,
    Extension(me): Extension<AuthWorker>,
) -> Result<Json<Vec<ServiceRequestView>>, JsonApiError> {
    Ok(Json(state.requests.notifications(me.id).await?))
}

#[utoipa::path(post, path = "/api/accept-service", tag = "requests", security(("bearer" = [])), request_body = crate::openapi::AcceptRequest, responses((status = 200, description = "Accepted", body = crate::openapi::AcceptResponse), (status = 404, description = "Service request not found", body = crate::errors::ErrorBody), (status = 409, description = "Service request already processed", body = crate::errors::ErrorBody)))]
pub async fn accept(
    State(state): State<ServerState>,
    Extension(me): Extension<AuthWorker>,
    JsonBody(input): JsonBody<AcceptInput>,
) -> Result<Json<AcceptOutput>, JsonApiError> {
    let request = state.requests.accept(me.id, input.request_id).await?;
    Ok(Json(AcceptOutput { message: "Service request accepted successfully".into(), request }))
}

#[utoipa::path(get, path = "/api/schedule", tag = "requests", security(("bearer" = [])), responses((status = 200, description = "Accepted jobs assigned to the worker", body = [crate::openapi::ScheduleEntryDoc])))]
pub async fn schedule(
    State(state): State<ServerState>,
    Extension(me): Extension<AuthWorker>,
) -> Result<Json<Vec<ScheduleEntry>>, JsonApiError> {
    Ok(Json(state.requests.schedule(me.id).await?))
}

#[utoipa::path(post, path = "/api/complete-service", tag = "requests", security(("bearer" = [])), request_body = crate::openapi::CompleteRequest, responses((status = 200, description = "Marked completed", body = crate::openapi::CompleteResponse), (status = 403, description = "Assigned to another worker", body = crate::errors::ErrorBody), (status = 404, description = "Service request not found", body = crate::errors::ErrorBody), (status = 409, description = "Service request is not accepted", body = crate::errors::ErrorBody)))]
pub async fn complete(
    State(state): State<ServerState>,
    Extension(me): Extension<AuthWorker>,
    JsonBody(input): JsonBody<CompleteInput>,
) -> Result<Json<CompleteOutput>, JsonApiError> {
    let completion = state
        .requests
        .complete(me.id, &input.service_request_id, input.completion_photo)
        .await?;
    Ok(Json(CompleteOutput { message: "Service marked as completed".into(), completion }))
}
