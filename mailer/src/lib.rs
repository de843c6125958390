use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use common::{
    env_config::MailConfig,
    error::{AppError, Res},
};

/// Transport abstraction so tests can swap the SMTP relay for a stub.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Transport for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| e.to_string())
    }
}

/// Outbound mail handle. One per process, cheap to clone behind an Arc in
/// app data.
pub struct Mailer {
    transport: Box<dyn Transport>,
    from_address: String,
}

impl Mailer {
    /// Builds an SMTP mailer from the environment-derived configuration.
    pub fn from_config(config: &MailConfig) -> Res<Self> {
        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| AppError::Mail(e.to_string()))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport: Box::new(transport),
            from_address: config.from_address.clone(),
        })
    }

    pub fn with_transport(transport: Box<dyn Transport>, from_address: &str) -> Self {
        Self {
            transport,
            from_address: from_address.to_string(),
        }
    }

    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Res<()> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| AppError::Mail("Invalid sender address".to_string()))?,
            )
            .to(to
                .parse()
                .map_err(|_| AppError::Mail("Invalid recipient address".to_string()))?)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| AppError::Mail(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(AppError::Mail)
    }

    /// Delivers the plaintext one-time passcode to a freshly registered
    /// user.
    pub async fn send_otp(&self, to: &str, otp: &str, valid_minutes: i64) -> Res<()> {
        let body = format!(
            "Your OTP is: {}.\nIts valid for {} minutes only.",
            otp, valid_minutes
        );
        self.send(to, "Verify Your Email", &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubTransport;
    #[async_trait]
    impl Transport for StubTransport {
        async fn send(&self, _email: Message) -> Result<(), String> {
            Ok(())
        }
    }

    struct RejectingTransport;
    #[async_trait]
    impl Transport for RejectingTransport {
        async fn send(&self, _email: Message) -> Result<(), String> {
            panic!("transport must not be reached for invalid addresses");
        }
    }

    #[tokio::test]
    async fn sends_otp_through_transport() {
        let mailer = Mailer::with_transport(Box::new(StubTransport), "noreply@example.com");

        let result = mailer.send_otp("user@example.com", "483920", 5).await;
        assert!(result.is_ok(), "expected Ok, got {:?}", result);
    }

    #[tokio::test]
    async fn invalid_recipient_fails_before_transport() {
        let mailer = Mailer::with_transport(Box::new(RejectingTransport), "noreply@example.com");

        let result = mailer.send("not-an-email", "Subject", "Body").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn invalid_sender_fails_before_transport() {
        let mailer = Mailer::with_transport(Box::new(RejectingTransport), "bad-from");

        let result = mailer.send("user@example.com", "Subject", "Body").await;
        assert!(result.is_err());
    }
}
