#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use service::mail::mock::RecordingMailer;
use service::InMemory;

use server::routes;
use server::ServerState;

pub const ADMIN_KEY: &str = "test-admin-key";
pub const PASSWORD: &str = "hunter2hunter2";

/// Router over in-memory repositories, with handles for seeding and inspecting mail.
pub struct TestApp {
    pub router: Router,
    pub store: InMemory,
    pub mailer: Arc<RecordingMailer>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_admin_key(Some(ADMIN_KEY))
    }

    pub fn with_admin_key(admin_key: Option<&str>) -> Self {
        let store = InMemory::default();
        let mailer = Arc::new(RecordingMailer::default());
        let auth = configs::AuthConfig {
            jwt_secret: "test-secret".into(),
            admin_api_key: admin_key.map(str::to_string),
            ..Default::default()
        };
        let mail = configs::MailConfig { portal_url: "http://portal.test/".into(), ..Default::default() };
        let state = ServerState::new(store.repositories(), mailer.clone(), &auth, &mail);
        let router = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());
        Self { router, store, mailer }
    }

    pub async fn send(&self, req: Request<Body>) -> anyhow::Result<TestResponse> {
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok(TestResponse { status, headers, body })
    }

    pub async fn post(&self, uri: &str, body: Value) -> anyhow::Result<TestResponse> {
        self.send(json_request(Method::POST, uri, body, &[])?).await
    }

    pub async fn authed(&self, method: Method, uri: &str, token: &str, body: Option<Value>) -> anyhow::Result<TestResponse> {
        let bearer = format!("Bearer {token}");
        let headers = [(header::AUTHORIZATION.as_str(), bearer.as_str())];
        let req = match body {
            Some(b) => json_request(method, uri, b, &headers)?,
            None => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, bearer.as_str())
                .body(Body::empty())?,
        };
        self.send(req).await
    }

    pub async fn admin(&self, uri: &str, key: &str, body: Value) -> anyhow::Result<TestResponse> {
        self.send(json_request(Method::POST, uri, body, &[("X-Admin-Key", key)])?).await
    }

    /// The code from the most recent OTP email.
    pub fn last_otp(&self) -> String {
        let mail = self.mailer.last().expect("an OTP email");
        mail.body.trim_start_matches("Your OTP is: ").chars().take(6).collect()
    }

    pub async fn signup(&self, email: &str) -> anyhow::Result<TestResponse> {
        self.post(
            "/api/auth/signup",
            serde_json::json!({
                "fullName": "Ravi Kumar",
                "email": email,
                "mobileNumber": "+91 98765 43210",
                "password": PASSWORD,
            }),
        )
        .await
    }

    /// Sign up and verify; returns the bearer token.
    pub async fn verified_worker(&self, email: &str) -> anyhow::Result<String> {
        let res = self.signup(email).await?;
        assert_eq!(res.status, StatusCode::CREATED);
        let otp = self.last_otp();
        let res = self.post("/api/auth/verify-otp", serde_json::json!({ "email": email, "otp": otp })).await?;
        assert_eq!(res.status, StatusCode::OK, "verify failed: {}", res.body);
        Ok(res.body["token"].as_str().unwrap_or_default().to_string())
    }
}

pub fn json_request(method: Method, uri: &str, body: Value, headers: &[(&str, &str)]) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    for (k, v) in headers {
        builder = builder.header(*k, *v);
    }
    Ok(builder.body(Body::from(serde_json::to_vec(&body)?))?)
}
