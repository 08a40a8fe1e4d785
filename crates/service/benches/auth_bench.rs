use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::domain::{LoginInput, SignupInput, VerifyOtpInput};
use service::auth::{AuthService, TokenKeys};
use service::mail::mock::RecordingMailer;
use service::worker::repository::mock::MockWorkerRepository;

fn bench_login(c: &mut Criterion) {
    let mailer = Arc::new(RecordingMailer::default());
    let svc = AuthService::new(
        Arc::new(MockWorkerRepository::default()),
        mailer.clone(),
        TokenKeys::new("secret", 24),
        10,
    );

    // sign up and verify outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(svc.signup(SignupInput {
        full_name: "Bench Worker".into(),
        email: "bench@example.com".into(),
        mobile_number: "9876543210".into(),
        password: "Benchmark1".into(),
    }))
    .unwrap();
    let otp: String = mailer.last().unwrap().body.trim_start_matches("Your OTP is: ").chars().take(6).collect();
    rt.block_on(svc.verify_otp(VerifyOtpInput { email: "bench@example.com".into(), otp })).unwrap();

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            rt.block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() }))
                .unwrap();
        });
    });

    let token = rt
        .block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() }))
        .unwrap()
        .token;
    c.bench_function("auth_verify_token", |b| {
        b.iter(|| svc.verify_token(&token).unwrap());
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
