use axum::{extract::State, Extension, Json};

use service::worker::domain::{ProfileUpdate, WorkerProfile};

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::routes::auth::AuthWorker;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/worker", tag = "worker", security(("bearer" = [])), responses((status = 200, description = "Profile of the signed-in worker", body = crate::openapi::WorkerDoc), (status = 401, description = "Unauthorized", body = crate::errors::ErrorBody), (status = 404, description = "Worker not found", body = crate::errors::ErrorBody)))]
pub async fn get_profile(
    State(state): State<ServerState>,
    Extension(me): Extension<AuthWorker>,
) -> Result<Json<WorkerProfile>, JsonApiError> {
    Ok(Json(state.workers.get_profile(me.id).await?))
}

#[utoipa::path(put, path = "/api/worker/update", tag = "worker", security(("bearer" = [])), request_body = crate::openapi::ProfileUpdateRequest, responses((status = 200, description = "Updated profile", body = crate::openapi::WorkerDoc), (status = 400, description = "Bad Request", body = crate::errors::ErrorBody), (status = 409, description = "Email already in use", body = crate::errors::ErrorBody)))]
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(me): Extension<AuthWorker>,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> Result<Json<WorkerProfile>, JsonApiError> {
    Ok(Json(state.workers.update_profile(me.id, update).await?))
}
