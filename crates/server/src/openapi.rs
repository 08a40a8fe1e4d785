use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

use crate::errors::ErrorBody;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageResponse { pub message: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest { pub full_name: String, pub email: String, pub mobile_number: String, pub password: String }

#[derive(ToSchema)]
pub struct VerifyOtpRequest { pub email: String, pub otp: String }

#[derive(ToSchema)]
pub struct EmailRequest { pub email: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct TokenRequest { pub token: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerDoc {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub is_verified: bool,
    pub is_approved: bool,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(ToSchema)]
pub struct VerifiedResponse { pub message: String, pub token: String, pub worker: WorkerDoc }

#[derive(ToSchema)]
pub struct SessionResponse { pub token: String, pub worker: WorkerDoc }

#[derive(Serialize, ToSchema)]
pub struct ClaimsDoc {
    #[serde(rename = "workerId")]
    pub worker_id: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(ToSchema)]
pub struct TokenStatusResponse { pub valid: bool, pub claims: Option<ClaimsDoc> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub image: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListingDoc {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub title: String,
    pub category: String,
    pub place: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: f64,
    pub duration: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(ToSchema)]
pub struct NewServiceRequest {
    pub title: String,
    pub category: String,
    pub place: String,
    pub description: String,
    pub images: Option<Vec<String>>,
    pub price: f64,
    pub duration: String,
}

#[derive(ToSchema)]
pub struct ListingsResponse { pub services: Vec<ServiceListingDoc> }

#[derive(ToSchema)]
pub struct ListingCreatedResponse { pub message: String, pub service: ServiceListingDoc }

#[derive(Serialize, ToSchema)]
pub struct SubServiceDoc { pub id: Uuid, pub name: String, pub category: String, pub price: f64 }

#[derive(ToSchema)]
pub struct NewSubServiceRequest { pub name: String, pub category: String, pub price: f64 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubServicesResponse { pub sub_services: Vec<SubServiceDoc> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestDoc {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub date_time: DateTime<Utc>,
    pub duration: String,
    /// pending, accepted, rejected or completed
    pub status: String,
    pub service_provider_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcceptRequest { pub request_id: Uuid }

#[derive(ToSchema)]
pub struct AcceptResponse { pub message: String, pub request: ServiceRequestDoc }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntryDoc {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub category: String,
    pub date_time: DateTime<Utc>,
    pub duration: String,
    pub status: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRequest { pub service_request_id: String, pub completion_photo: Option<String> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionDoc {
    pub id: Uuid,
    pub service_request_id: Uuid,
    pub completion_status: String,
    pub completion_photo: String,
}

#[derive(ToSchema)]
pub struct CompleteResponse { pub message: String, pub completion: CompletionDoc }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveServiceRequest { pub service_id: Uuid }

#[derive(ToSchema)]
pub struct WorkerApprovedResponse { pub message: String, pub worker: WorkerDoc }

#[derive(ToSchema)]
pub struct ServiceApprovedResponse { pub message: String, pub service: ServiceListingDoc }

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
            components.add_security_scheme(
                "admin_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(crate::routes::admin::ADMIN_KEY_HEADER))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::signup,
        crate::routes::auth::verify_otp,
        crate::routes::auth::resend_otp,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::verify_token,
        crate::routes::worker::get_profile,
        crate::routes::worker::update_profile,
        crate::routes::services::list,
        crate::routes::services::add,
        crate::routes::services::sub_services,
        crate::routes::requests::notifications,
        crate::routes::requests::accept,
        crate::routes::requests::schedule,
        crate::routes::requests::complete,
        crate::routes::admin::approve_worker,
        crate::routes::admin::approve_service,
        crate::routes::admin::add_sub_service,
    ),
    components(
        schemas(
            ErrorBody,
            HealthResponse,
            MessageResponse,
            SignupRequest,
            VerifyOtpRequest,
            EmailRequest,
            LoginRequest,
            TokenRequest,
            WorkerDoc,
            VerifiedResponse,
            SessionResponse,
            ClaimsDoc,
            TokenStatusResponse,
            ProfileUpdateRequest,
            ServiceListingDoc,
            NewServiceRequest,
            ListingsResponse,
            ListingCreatedResponse,
            SubServiceDoc,
            NewSubServiceRequest,
            SubServicesResponse,
            ServiceRequestDoc,
            AcceptRequest,
            AcceptResponse,
            ScheduleEntryDoc,
            CompleteRequest,
            CompletionDoc,
            CompleteResponse,
            ApproveServiceRequest,
            WorkerApprovedResponse,
            ServiceApprovedResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "worker"),
        (name = "services"),
        (name = "requests"),
        (name = "admin")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for p in [
            "/health",
            "/api/auth/signup",
            "/api/auth/login",
            "/api/worker/update",
            "/api/accept-service",
            "/api/complete-service",
            "/api/admin/subservices",
        ] {
            assert!(paths.contains(&p), "missing {p}");
        }
        let schemes = &doc.components.as_ref().unwrap().security_schemes;
        assert!(schemes.contains_key("bearer"));
        assert!(schemes.contains_key("admin_key"));
    }
}
