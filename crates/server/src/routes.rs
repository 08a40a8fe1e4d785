pub mod admin;
pub mod auth;
pub mod requests;
pub mod services;
pub mod worker;

use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public auth, worker (bearer token) and admin (`X-Admin-Key`) routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/verify-otp", post(auth::verify_otp))
        .route("/api/auth/resend-otp", post(auth::resend_otp))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/verify-token", post(auth::verify_token));

    let worker_routes = Router::new()
        .route("/api/worker", get(worker::get_profile))
        .route("/api/worker/update", put(worker::update_profile))
        .route("/api/services", get(services::list))
        .route("/api/services/add", post(services::add))
        .route("/api/services/subservices", get(services::sub_services))
        .route("/api/notifications", get(requests::notifications))
        .route("/api/accept-service", post(requests::accept))
        .route("/api/schedule", get(requests::schedule))
        .route("/api/complete-service", post(requests::complete))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_worker));

    let admin_routes = Router::new()
        .route("/api/worker/approve", post(admin::approve_worker))
        .route("/api/services/approve", post(admin::approve_service))
        .route("/api/admin/subservices", post(admin::add_sub_service))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin::require_admin_key));

    public
        .merge(worker_routes)
        .merge(admin_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
