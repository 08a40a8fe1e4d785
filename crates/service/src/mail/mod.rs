//! Outbound email. Handlers depend on the [`Mailer`] trait; startup picks
//! [`SmtpMailer`] when credentials are configured and [`LogMailer`] otherwise.

mod smtp;

pub use smtp::SmtpMailer;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Email {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self { to: to.into(), subject: subject.into(), body: body.into() }
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(String),
    #[error("message build failed: {0}")]
    Build(String),
    #[error("transport failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

/// Writes messages to the log instead of sending them.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        info!(service = "mail", event = "email_logged", to = %email.to, subject = %email.subject, body = %email.body);
        Ok(())
    }
}

/// Recording mailer for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingMailer {
        sent: Mutex<Vec<Email>>,
        fail: AtomicBool,
    }

    impl RecordingMailer {
        pub fn failing() -> Self {
            let m = Self::default();
            m.set_failing(true);
            m
        }

        pub fn set_failing(&self, fail: bool) { self.fail.store(fail, Ordering::SeqCst); }

        pub fn sent(&self) -> Vec<Email> { self.sent.lock().unwrap().clone() }

        pub fn last(&self) -> Option<Email> { self.sent.lock().unwrap().last().cloned() }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: Email) -> Result<(), MailError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(MailError::Transport("connection refused".into()));
            }
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }
}
