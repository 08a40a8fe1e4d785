use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, LoginInput, SignupInput, VerifyOtpInput};
use super::errors::AuthError;
use super::token::{Claims, TokenKeys};
use super::{otp, password};
use crate::mail::{Email, Mailer};
use crate::worker::domain::{NewWorkerAccount, WorkerProfile};
use crate::worker::repository::WorkerRepository;

pub const OTP_SUBJECT: &str = "Verify Your Email - Worker Portal";

fn otp_email(to: &str, code: &str, ttl_minutes: i64) -> Email {
    Email::new(to, OTP_SUBJECT, format!("Your OTP is: {code}. It expires in {ttl_minutes} minutes."))
}

/// Auth business service independent of web framework
pub struct AuthService {
    workers: Arc<dyn WorkerRepository>,
    mailer: Arc<dyn Mailer>,
    keys: TokenKeys,
    otp_ttl_minutes: i64,
}

impl AuthService {
    pub fn new(workers: Arc<dyn WorkerRepository>, mailer: Arc<dyn Mailer>, keys: TokenKeys, otp_ttl_minutes: i64) -> Self {
        Self { workers, mailer, keys, otp_ttl_minutes }
    }

    pub fn keys(&self) -> &TokenKeys { &self.keys }

    /// Create an unverified worker and email them an OTP.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, TokenKeys, domain::SignupInput};
    /// use service::mail::mock::RecordingMailer;
    /// use service::worker::repository::mock::MockWorkerRepository;
    /// let mailer = Arc::new(RecordingMailer::default());
    /// let svc = AuthService::new(Arc::new(MockWorkerRepository::default()), mailer.clone(), TokenKeys::new("secret", 24), 10);
    /// let input = SignupInput { full_name: "Asha Patel".into(), email: "Asha@Example.com".into(), mobile_number: "9876543210".into(), password: "Secret123".into() };
    /// let worker = tokio_test::block_on(svc.signup(input)).unwrap();
    /// assert_eq!(worker.email, "asha@example.com");
    /// assert!(!worker.is_verified);
    /// assert_eq!(mailer.sent().len(), 1);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn signup(&self, input: SignupInput) -> Result<WorkerProfile, AuthError> {
        models::worker::validate_full_name(&input.full_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        models::worker::validate_email(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        models::worker::validate_mobile_number(&input.mobile_number).map_err(|e| AuthError::Validation(e.to_string()))?;
        password::check_strength(&input.password)?;

        let email = models::validate::normalize_email(&input.email);
        if let Some(existing) = self.workers.find_by_email(&email).await? {
            debug!("worker exists: {}", existing.profile.email);
            return Err(AuthError::Conflict);
        }

        let code = otp::generate();
        let account = self
            .workers
            .create(NewWorkerAccount {
                full_name: input.full_name.trim().to_string(),
                email,
                mobile_number: input.mobile_number.trim().to_string(),
                password_hash: password::hash(&input.password)?,
                otp: code.clone(),
                otp_expires_at: otp::expires_at(Utc::now(), self.otp_ttl_minutes),
            })
            .await?;
        info!(service = "auth", event = "worker_signed_up", worker_id = %account.id());

        self.mailer.send(otp_email(&account.profile.email, &code, self.otp_ttl_minutes)).await?;
        Ok(account.profile)
    }

    /// Confirm the emailed code, mark the worker verified and issue a token.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn verify_otp(&self, input: VerifyOtpInput) -> Result<AuthSession, AuthError> {
        let email = models::validate::normalize_email(&input.email);
        let account = self.workers.find_by_email(&email).await?.ok_or(AuthError::NotFound)?;

        if !otp::is_valid(account.otp.as_deref(), account.otp_expires_at, input.otp.trim(), Utc::now()) {
            return Err(AuthError::InvalidOtp);
        }

        let verified = self.workers.mark_verified(account.id()).await?;
        let token = self.keys.issue(verified.id(), &verified.profile.email)?;
        info!(service = "auth", event = "worker_verified", worker_id = %verified.id());
        Ok(AuthSession { worker: verified.profile, token })
    }

    /// Replace the pending OTP with a fresh one and email it.
    #[instrument(skip(self))]
    pub async fn resend_otp(&self, email: &str) -> Result<(), AuthError> {
        let email = models::validate::normalize_email(email);
        let account = self.workers.find_by_email(&email).await?.ok_or(AuthError::NotFound)?;
        if account.profile.is_verified {
            return Err(AuthError::AlreadyVerified);
        }

        let code = otp::generate();
        self.workers
            .set_otp(account.id(), &code, otp::expires_at(Utc::now(), self.otp_ttl_minutes))
            .await?;
        self.mailer.send(otp_email(&account.profile.email, &code, self.otp_ttl_minutes)).await?;
        info!(service = "auth", event = "otp_resent", worker_id = %account.id());
        Ok(())
    }

    /// Authenticate a verified worker and issue a token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, TokenKeys, errors::AuthError, domain::{SignupInput, LoginInput}};
    /// use service::mail::mock::RecordingMailer;
    /// use service::worker::repository::mock::MockWorkerRepository;
    /// let svc = AuthService::new(Arc::new(MockWorkerRepository::default()), Arc::new(RecordingMailer::default()), TokenKeys::new("secret", 24), 10);
    /// let _ = tokio_test::block_on(svc.signup(SignupInput { full_name: "N".into(), email: "u@e.com".into(), mobile_number: "9876543210".into(), password: "Passw0rd".into() }));
    /// let res = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// assert!(matches!(res, Err(AuthError::Unverified)));
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let email = models::validate::normalize_email(&input.email);
        let account = self.workers.find_by_email(&email).await?.ok_or(AuthError::NotFound)?;

        if !account.profile.is_verified {
            return Err(AuthError::Unverified);
        }
        if !password::verify(&input.password, &account.password_hash)? {
            return Err(AuthError::Unauthorized);
        }

        let token = self.keys.issue(account.id(), &account.profile.email)?;
        info!(service = "auth", event = "worker_logged_in", worker_id = %account.id());
        Ok(AuthSession { worker: account.profile, token })
    }

    #[instrument(skip_all)]
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.keys.verify(token.trim())
    }
}
