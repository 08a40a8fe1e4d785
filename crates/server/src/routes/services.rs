use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Serialize;

use service::catalog::domain::{NewServiceInput, ServiceListing, SubService};

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::routes::auth::AuthWorker;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct ListingsOutput {
    pub services: Vec<ServiceListing>,
}

#[derive(Debug, Serialize)]
pub struct ListingCreated {
    pub message: String,
    pub service: ServiceListing,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubServicesOutput {
    pub sub_services: Vec<SubService>,
}

#[utoipa::path(get, path = "/api/services", tag = "services", security(("bearer" = [])), responses((status = 200, description = "Services listed by the signed-in worker", body = crate::openapi::ListingsResponse)))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(me): Extension<AuthWorker>,
) -> Result<Json<ListingsOutput>, JsonApiError> {
    let services = state.catalog.listings_for_worker(me.id).await?;
    Ok(Json(ListingsOutput { services }))
}

#[utoipa::path(post, path = "/api/services/add", tag = "services", security(("bearer" = [])), request_body = crate::openapi::NewServiceRequest, responses((status = 201, description = "Created, awaiting approval", body = crate::openapi::ListingCreatedResponse), (status = 400, description = "Bad Request", body = crate::errors::ErrorBody)))]
pub async fn add(
    State(state): State<ServerState>,
    Extension(me): Extension<AuthWorker>,
    JsonBody(input): JsonBody<NewServiceInput>,
) -> Result<(StatusCode, Json<ListingCreated>), JsonApiError> {
    let service = state.catalog.add_listing(me.id, input).await?;
    Ok((StatusCode::CREATED, Json(ListingCreated { message: "Service added successfully".into(), service })))
}

#[utoipa::path(get, path = "/api/services/subservices", tag = "services", security(("bearer" = [])), responses((status = 200, description = "Sub-service catalog", body = crate::openapi::SubServicesResponse)))]
pub async fn sub_services(State(state): State<ServerState>) -> Result<Json<SubServicesOutput>, JsonApiError> {
    let sub_services = state.catalog.sub_services().await?;
    Ok(Json(SubServicesOutput { sub_services }))
}
