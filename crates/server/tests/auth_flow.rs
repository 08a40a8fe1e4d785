mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use common::{TestApp, PASSWORD};

#[tokio::test]
async fn signup_verify_and_login() -> anyhow::Result<()> {
    let app = TestApp::new();

    let res = app.signup("Ravi@Example.com").await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["message"], "OTP sent to email");
    let mail = app.mailer.last().expect("otp mail");
    assert_eq!(mail.to, "ravi@example.com");

    // login before verification is refused
    let res = app.post("/api/auth/login", json!({ "email": "ravi@example.com", "password": PASSWORD })).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["message"], "Please verify your email first");

    let otp = app.last_otp();
    let res = app.post("/api/auth/verify-otp", json!({ "email": "ravi@example.com", "otp": otp })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["worker"]["isVerified"], true);
    assert!(res.body["worker"].get("passwordHash").is_none());
    assert!(res.body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let res = app.post("/api/auth/login", json!({ "email": "ravi@example.com", "password": PASSWORD })).await?;
    assert_eq!(res.status, StatusCode::OK);
    let cookie = res.headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(res.body["worker"]["email"], "ravi@example.com");
    Ok(())
}

#[tokio::test]
async fn duplicate_signup_conflicts() -> anyhow::Result<()> {
    let app = TestApp::new();
    assert_eq!(app.signup("dup@example.com").await?.status, StatusCode::CREATED);

    let res = app.signup("DUP@example.com").await?;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["error"], "Conflict");
    assert_eq!(res.body["message"], "Worker already exists");
    Ok(())
}

#[tokio::test]
async fn signup_rejects_bad_input() -> anyhow::Result<()> {
    let app = TestApp::new();
    let res = app
        .post(
            "/api/auth/signup",
            json!({ "fullName": "A", "email": "not-an-email", "mobileNumber": "9876543210", "password": PASSWORD }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    // missing field is reported as a JSON error body, not plain text
    let res = app.post("/api/auth/signup", json!({ "email": "x@example.com" })).await?;
    assert!(res.status.is_client_error());
    assert!(res.body["message"].is_string());
    assert!(app.mailer.sent().is_empty());
    Ok(())
}

#[tokio::test]
async fn signup_mail_failure_is_bad_gateway_and_resend_recovers() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.mailer.set_failing(true);
    let res = app.signup("flaky@example.com").await?;
    assert_eq!(res.status, StatusCode::BAD_GATEWAY);

    app.mailer.set_failing(false);
    let res = app.post("/api/auth/resend-otp", json!({ "email": "flaky@example.com" })).await?;
    assert_eq!(res.status, StatusCode::OK);
    let otp = app.last_otp();
    let res = app.post("/api/auth/verify-otp", json!({ "email": "flaky@example.com", "otp": otp })).await?;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.post("/api/auth/resend-otp", json!({ "email": "flaky@example.com" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn wrong_otp_and_wrong_password() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.signup("otp@example.com").await?;
    let res = app.post("/api/auth/verify-otp", json!({ "email": "otp@example.com", "otp": "ZZZZZZ" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Invalid or expired OTP");

    let res = app.post("/api/auth/verify-otp", json!({ "email": "ghost@example.com", "otp": "ABCDEF" })).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    app.verified_worker("pw@example.com").await?;
    let res = app.post("/api/auth/login", json!({ "email": "pw@example.com", "password": "wrong-password" })).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    let res = app.post("/api/auth/login", json!({ "email": "nobody@example.com", "password": PASSWORD })).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn protected_routes_need_a_token() -> anyhow::Result<()> {
    let app = TestApp::new();
    let req = Request::builder().uri("/api/worker").body(Body::empty())?;
    let res = app.send(req).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "Unauthorized");

    let res = app.authed(Method::GET, "/api/worker", "not.a.jwt", None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn bearer_and_cookie_both_authenticate() -> anyhow::Result<()> {
    let app = TestApp::new();
    let token = app.verified_worker("both@example.com").await?;

    let res = app.authed(Method::GET, "/api/worker", &token, None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["email"], "both@example.com");

    let req = Request::builder()
        .uri("/api/worker")
        .header(header::COOKIE, format!("token={token}"))
        .body(Body::empty())?;
    let res = app.send(req).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["fullName"], "Ravi Kumar");
    Ok(())
}

#[tokio::test]
async fn verify_token_reports_validity() -> anyhow::Result<()> {
    let app = TestApp::new();
    let token = app.verified_worker("tok@example.com").await?;

    let res = app.post("/api/auth/verify-token", json!({ "token": token })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["valid"], true);
    assert_eq!(res.body["claims"]["email"], "tok@example.com");
    assert!(res.body["claims"]["workerId"].is_string());

    let res = app.post("/api/auth/verify-token", json!({ "token": "garbage" })).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["valid"], false);
    Ok(())
}

#[tokio::test]
async fn logout_clears_cookie() -> anyhow::Result<()> {
    let app = TestApp::new();
    let req = Request::builder().method(Method::POST).uri("/api/auth/logout").body(Body::empty())?;
    let res = app.send(req).await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let cookie = res.headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(cookie.starts_with("token="));
    Ok(())
}

#[tokio::test]
async fn profile_update_round_trip() -> anyhow::Result<()> {
    let app = TestApp::new();
    let token = app.verified_worker("edit@example.com").await?;
    app.verified_worker("taken@example.com").await?;

    let res = app
        .authed(Method::PUT, "/api/worker/update", &token, Some(json!({ "fullName": "  Ravi K  ", "image": "https://cdn.example.com/me.png" })))
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["fullName"], "Ravi K");
    assert_eq!(res.body["image"], "https://cdn.example.com/me.png");
    assert_eq!(res.body["email"], "edit@example.com");

    let res = app
        .authed(Method::PUT, "/api/worker/update", &token, Some(json!({ "email": "Taken@example.com" })))
        .await?;
    assert_eq!(res.status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_are_public() -> anyhow::Result<()> {
    let app = TestApp::new();
    let res = app.send(Request::builder().uri("/health").body(Body::empty())?).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");

    let res = app.send(Request::builder().uri("/api-docs/openapi.json").body(Body::empty())?).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["paths"].get("/api/accept-service").is_some());
    Ok(())
}
