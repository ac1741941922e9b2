use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::types::*;

/// Trait for email service implementations
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a plain-text email to the configured recipients, returning a delivery id
    async fn send_email(&self, subject: &str, body: &str) -> Result<String, NotificationError>;

    /// Send an availability change report
    async fn notify(&self, body: &str) -> Result<String, NotificationError> {
        self.send_email(EMAIL_SUBJECT, body).await
    }
}

/// Email service sending through an authenticated SMTP relay
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
    cc: Vec<Mailbox>,
}

impl SmtpEmailService {
    /// Creates a new SMTP email service from the send configuration.
    ///
    /// Addresses are validated up front; no connection is opened until the first send.
    pub fn new(config: &SendConfig) -> Result<Self, NotificationError> {
        let address = config.user.parse::<Address>().map_err(|e| {
            NotificationError::InvalidAddress {
                address: config.user.clone(),
                reason: e.to_string(),
            }
        })?;
        let from = Mailbox::new(Some(config.name.clone()), address);

        let to = parse_mailboxes(&config.to)?;
        if to.is_empty() {
            return Err(NotificationError::InvalidAddress {
                address: String::new(),
                reason: "at least one recipient is required".to_string(),
            });
        }
        let cc = parse_mailboxes(&config.cc)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from,
            to,
            cc,
        })
    }

    /// Assemble the message without sending it
    pub fn build_message(&self, subject: &str, body: &str) -> Result<Message, NotificationError> {
        let mut builder = Message::builder().from(self.from.clone()).subject(subject);

        for mailbox in &self.to {
            builder = builder.to(mailbox.clone());
        }
        for mailbox in &self.cc {
            builder = builder.cc(mailbox.clone());
        }

        Ok(builder
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?)
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(&self, subject: &str, body: &str) -> Result<String, NotificationError> {
        let message = self.build_message(subject, body)?;

        log::info!(
            "📧 Sending '{}' to {} recipient(s) via SMTP...",
            subject,
            self.to.len() + self.cc.len()
        );

        let response = self.transport.send(message).await.map_err(|e| {
            log::error!("❌ SMTP error: {}", e);
            NotificationError::Transport(e)
        })?;

        let reply = response.message().collect::<Vec<_>>().join(" ");
        log::info!("✅ Email accepted: {} {}", response.code(), reply);

        Ok(reply)
    }
}

/// Mock email service for dry runs and testing
pub struct MockEmailService;

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, subject: &str, body: &str) -> Result<String, NotificationError> {
        log::info!("📧 [MOCK EMAIL] Subject: {}", subject);
        log::info!("📧 [MOCK EMAIL] Body:\n{}", body);

        Ok("mock-email".to_string())
    }
}

fn parse_mailboxes(recipients: &Recipients) -> Result<Vec<Mailbox>, NotificationError> {
    recipients
        .iter()
        .map(|address| {
            address
                .parse::<Mailbox>()
                .map_err(|e| NotificationError::InvalidAddress {
                    address: address.to_string(),
                    reason: e.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send_config(to: &[&str], cc: &[&str]) -> SendConfig {
        SendConfig {
            host: "smtp.example.com".to_string(),
            user: "bot@example.com".to_string(),
            password: "secret".to_string(),
            name: "Park Bot".to_string(),
            to: Recipients::new(to.iter().copied()),
            cc: Recipients::new(cc.iter().copied()),
        }
    }

    #[tokio::test]
    async fn test_build_message_headers() {
        let service =
            SmtpEmailService::new(&send_config(&["me@example.com"], &["you@example.com"])).unwrap();

        let message = service
            .build_message(EMAIL_SUBJECT, "2024-01-01:\n  Added:\n    + Epcot\n")
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: WDW Availability Change"));
        assert!(raw.contains("bot@example.com"));
        assert!(raw.contains("Park Bot"));
        assert!(raw.contains("To: me@example.com"));
        assert!(raw.contains("Cc: you@example.com"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("+ Epcot"));
    }

    #[tokio::test]
    async fn test_build_message_without_cc() {
        let service = SmtpEmailService::new(&send_config(
            &["me@example.com", "Partner <partner@example.com>"],
            &[],
        ))
        .unwrap();

        let raw = String::from_utf8(service.build_message("Hi", "body").unwrap().formatted()).unwrap();

        assert!(raw.contains("partner@example.com"));
        assert!(!raw.contains("Cc:"));
    }

    #[tokio::test]
    async fn test_display_name_with_comma() {
        let mut config = send_config(&[], &[]);
        config.to =
            serde_json::from_str(r#""\"Doe, Jane\" <jane@example.com>, b@example.com""#).unwrap();

        let service = SmtpEmailService::new(&config).unwrap();
        let raw = String::from_utf8(service.build_message("Hi", "body").unwrap().formatted()).unwrap();

        assert_eq!(service.to.len(), 2);
        assert!(raw.contains("jane@example.com"));
        assert!(raw.contains("b@example.com"));
    }

    #[test]
    fn test_invalid_recipient() {
        let result = SmtpEmailService::new(&send_config(&["not an address"], &[]));

        assert!(matches!(
            result,
            Err(NotificationError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_recipient_required() {
        let result = SmtpEmailService::new(&send_config(&[], &[]));

        assert!(matches!(
            result,
            Err(NotificationError::InvalidAddress { .. })
        ));
    }

    #[tokio::test]
    async fn test_mock_email_service_notify() {
        let id = MockEmailService.notify("nothing changed").await.unwrap();

        assert_eq!(id, "mock-email");
    }
}
