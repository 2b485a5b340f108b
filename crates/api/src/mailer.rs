//! Outgoing email.
//!
//! [`Mailer`] is the seam handlers send through. [`SmtpMailer`] delivers via
//! the `lettre` async SMTP transport; [`LogMailer`] only logs and is used when
//! `SMTP_HOST` is not configured.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use plantseed_core::types::DbId;
use plantseed_core::users::ACTIVATION_TOKEN_TTL_HOURS;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "Plantseed <no-reply@plantseed.local>";

/// SMTP settings.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" mailbox.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load SMTP settings, or `None` when `SMTP_HOST` is unset.
    ///
    /// | Variable        | Default                                 |
    /// |-----------------|-----------------------------------------|
    /// | `SMTP_HOST`     | none (mail is logged instead)           |
    /// | `SMTP_PORT`     | `587`                                   |
    /// | `SMTP_FROM`     | `Plantseed <no-reply@plantseed.local>`  |
    /// | `SMTP_USER`     | none                                    |
    /// | `SMTP_PASSWORD` | none                                    |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// The email sent after registration, carrying the activation token.
#[derive(Debug, Clone)]
pub struct WelcomeEmail {
    pub recipient: String,
    pub user_id: DbId,
    pub activation_token: String,
}

impl WelcomeEmail {
    pub fn subject(&self) -> &'static str {
        "Welcome to Plantseed!"
    }

    pub fn body(&self) -> String {
        format!(
            "Hi,\n\n\
             Thanks for signing up for a Plantseed account. Your user ID number is {}.\n\n\
             Please send a request to the `PUT /v1/users/activated` endpoint with the \
             following JSON body to activate your account:\n\n\
             {{\"token\": \"{}\"}}\n\n\
             Please note that this is a one-time use token and it will expire in {} days.\n\n\
             Thanks,\n\nThe Plantseed Team\n",
            self.user_id,
            self.activation_token,
            ACTIVATION_TOKEN_TTL_HOURS / 24,
        )
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), MailerError>;
}

/// Delivers mail through an SMTP relay (STARTTLS).
pub struct SmtpMailer {
    from_address: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, MailerError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            from_address: config.from_address.clone(),
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.from_address.parse()?)
            .to(email.recipient.parse()?)
            .subject(email.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body())
            .map_err(|e| MailerError::Build(e.to_string()))?;

        self.transport.send(message).await?;

        tracing::info!(to = %email.recipient, user_id = email.user_id, "Welcome email sent");
        Ok(())
    }
}

/// Writes mail to the log instead of sending it.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), MailerError> {
        tracing::info!(
            to = %email.recipient,
            user_id = email.user_id,
            subject = email.subject(),
            body = %email.body(),
            "SMTP not configured, welcome email logged only"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn welcome() -> WelcomeEmail {
        WelcomeEmail {
            recipient: "alice@example.com".into(),
            user_id: 42,
            activation_token: "Y3QMGX3PJ3WLRL2YRTQGQ6KRHU".into(),
        }
    }

    #[test]
    fn welcome_body_carries_token_and_user_id() {
        let body = welcome().body();
        assert!(body.contains(r#"{"token": "Y3QMGX3PJ3WLRL2YRTQGQ6KRHU"}"#));
        assert!(body.contains("Your user ID number is 42."));
        assert!(body.contains("expire in 3 days"));
    }

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        assert!(LogMailer.send_welcome(&welcome()).await.is_ok());
    }

    #[test]
    fn default_from_address_parses() {
        assert!(DEFAULT_FROM_ADDRESS.parse::<lettre::message::Mailbox>().is_ok());
    }

    #[test]
    fn error_display_build() {
        let err = MailerError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
