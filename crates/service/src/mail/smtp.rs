use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, instrument};

use super::{Email, MailError, Mailer};

/// SMTP relay over STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Returns `Ok(None)` when the mail section carries no credentials.
    pub fn from_config(cfg: &configs::MailConfig) -> Result<Option<Self>, MailError> {
        let (Some(user), Some(pass)) = (cfg.username.as_deref(), cfg.password.as_deref()) else {
            return Ok(None);
        };
        let from = cfg.from.as_deref().unwrap_or(user);
        let from: Mailbox = from.parse().map_err(|e| MailError::Address(format!("{from}: {e}")))?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.smtp_host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(cfg.smtp_port)
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .build();
        info!(host = %cfg.smtp_host, port = cfg.smtp_port, "smtp mailer configured");
        Ok(Some(Self { transport, from }))
    }

    fn build(&self, email: &Email) -> Result<Message, MailError> {
        let to: Mailbox = email.to.parse().map_err(|e| MailError::Address(format!("{}: {e}", email.to)))?;
        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, email), fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: Email) -> Result<(), MailError> {
        let msg = self.build(&email)?;
        self.transport.send(msg).await.map_err(|e| MailError::Transport(e.to_string()))?;
        info!(service = "mail", event = "email_sent");
        Ok(())
    }
}
