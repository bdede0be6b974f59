use std::time::Duration;

use anyhow::{anyhow, Context};
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::email_address::EmailAddressWithName;
use folio_utils::Apply;
use lettre::{
    message::{header, Mailbox, MessageBuilder},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, warn};

pub mod template;

/// The mail provider session. Built once at startup and shared by every
/// request; the underlying transport pools its smtp connections.
#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: Option<Mailbox>,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    pub smtp_host: String,
    pub smtp_port: Option<u16>,
    pub credentials: Option<SmtpCredentials>,
    pub from: Option<EmailAddressWithName>,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// How the connection to the smtp server is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTls {
    /// TLS from the first byte, on port 465.
    Implicit,
    /// Plain connection upgraded with `STARTTLS`, usually on port 587.
    StartTls,
}

impl SmtpTls {
    pub const IMPLICIT_PORT: u16 = 465;

    /// Port 465 (or no port) uses implicit TLS, any other port `STARTTLS`.
    pub fn for_port(port: Option<u16>) -> Self {
        match port {
            None | Some(Self::IMPLICIT_PORT) => Self::Implicit,
            Some(_) => Self::StartTls,
        }
    }
}

impl EmailServiceImpl {
    pub fn new(config: EmailServiceConfig) -> anyhow::Result<Self> {
        let from = config.from.as_ref().map(mailbox).transpose()?;

        if from.is_none() {
            warn!("No sender address configured, sending emails will fail");
        }
        if config.credentials.is_none() {
            warn!("No smtp credentials configured, sending emails will most likely fail");
        }

        let relay = match SmtpTls::for_port(config.smtp_port) {
            SmtpTls::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host),
            SmtpTls::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            }
        };
        let transport = relay
            .with_context(|| format!("Invalid smtp host {:?}", config.smtp_host))?
            .apply_map(config.smtp_port, |builder, port| builder.port(port))
            .apply_map(config.credentials, |builder, credentials| {
                builder.credentials(Credentials::new(
                    credentials.username,
                    credentials.password,
                ))
            })
            .timeout(Some(config.timeout))
            .build();

        Ok(Self { from, transport })
    }

    #[cfg(feature = "dummy")]
    pub fn dummy() -> Self {
        Self::new(EmailServiceConfig {
            smtp_host: "localhost".into(),
            smtp_port: None,
            credentials: None,
            from: Some(
                "dummy@example.com"
                    .parse::<folio_models::email_address::EmailAddress>()
                    .unwrap()
                    .into(),
            ),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        let from = self
            .from
            .clone()
            .context("No sender address configured")?;

        Message::builder()
            .from(from)
            .to(mailbox(&email.recipient)?)
            .apply_map(
                email.reply_to.as_ref().map(mailbox).transpose()?,
                MessageBuilder::reply_to,
            )
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)
            .map_err(Into::into)
    }
}

impl EmailService for EmailServiceImpl {
    #[tracing::instrument(skip_all, fields(recipient = email.recipient.email.as_str()))]
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = self.build_message(email)?;

        let response = self.transport.send(message).await?;
        debug!(code = %response.code(), "smtp server responded");

        Ok(response.is_positive())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn mailbox(address: &EmailAddressWithName) -> anyhow::Result<Mailbox> {
    let email = address
        .email
        .as_str()
        .parse()
        .with_context(|| format!("Unsupported email address {}", address.email))?;
    Ok(Mailbox::new(
        address.name.as_deref().and_then(display_name),
        email,
    ))
}

/// Header values must not contain line breaks, so control characters in a
/// display name are collapsed into single spaces.
fn display_name(name: &str) -> Option<String> {
    let name = name
        .split(char::is_control)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use folio_models::email_address::EmailAddress;

    use super::*;

    fn sut() -> EmailServiceImpl {
        EmailServiceImpl::new(EmailServiceConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: Some(2525),
            credentials: Some(SmtpCredentials {
                username: "owner@example.com".into(),
                password: "hunter2".into(),
            }),
            from: Some(
                "owner@example.com"
                    .parse::<EmailAddress>()
                    .unwrap()
                    .with_name("Portfolio".into()),
            ),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn build_html_message() {
        // Arrange
        let sut = sut();
        let email = Email {
            recipient: "test@example.com".parse::<EmailAddress>().unwrap().into(),
            subject: "The Subject".into(),
            body: "<h1>Hello World!</h1>".into(),
            content_type: ContentType::Html,
            reply_to: Some("replyto@example.com".parse::<EmailAddress>().unwrap().into()),
        };

        // Act
        let message = sut.build_message(email).unwrap();

        // Assert
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("owner@example.com"));
        assert!(formatted.contains("To: test@example.com"));
        assert!(formatted.contains("Reply-To: replyto@example.com"));
        assert!(formatted.contains("Subject: The Subject"));
        assert!(formatted.contains("Content-Type: text/html; charset=utf-8"));
        assert!(formatted.contains("<h1>Hello World!</h1>"));
    }

    #[tokio::test]
    async fn build_text_message_without_reply_to() {
        let sut = sut();
        let email = Email {
            recipient: "test@example.com".parse::<EmailAddress>().unwrap().into(),
            subject: "Plain".into(),
            body: "Hello".into(),
            content_type: ContentType::Text,
            reply_to: None,
        };

        let formatted = String::from_utf8(sut.build_message(email).unwrap().formatted()).unwrap();

        assert!(!formatted.contains("Reply-To"));
        assert!(formatted.contains("Content-Type: text/plain; charset=utf-8"));
    }

    #[tokio::test]
    async fn build_message_without_sender() {
        let sut = EmailServiceImpl::new(EmailServiceConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: None,
            credentials: None,
            from: None,
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        let email = Email {
            recipient: "test@example.com".parse::<EmailAddress>().unwrap().into(),
            subject: "Plain".into(),
            body: "Hello".into(),
            content_type: ContentType::Text,
            reply_to: None,
        };

        let result = sut.build_message(email);

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn build_message_with_line_breaks_in_name() {
        for name in ["Jo\nMallory", "Jo\r\nMallory", "Jo\t\n Mallory\r\n"] {
            // Arrange
            let sut = sut();
            let email = Email {
                recipient: "test@example.com".parse::<EmailAddress>().unwrap().into(),
                subject: "Hi".into(),
                body: "Hello".into(),
                content_type: ContentType::Text,
                reply_to: Some(
                    "jo@example.com"
                        .parse::<EmailAddress>()
                        .unwrap()
                        .with_name(name.into()),
                ),
            };

            // Act
            let message = sut.build_message(email).unwrap();

            // Assert
            let formatted = String::from_utf8(message.formatted()).unwrap();
            let reply_to = formatted
                .lines()
                .find(|line| line.starts_with("Reply-To:"))
                .unwrap();
            assert!(reply_to.contains("Jo Mallory"), "{name:?}: {reply_to}");
            assert!(reply_to.contains("jo@example.com"), "{name:?}: {reply_to}");
            assert!(!formatted.contains("\nMallory"), "{name:?}");
        }
    }

    #[test]
    fn display_name_only_control_characters() {
        assert_eq!(display_name("\r\n\t"), None);
        assert_eq!(display_name("  Jo  "), Some("Jo".into()));
    }

    #[test]
    fn tls_mode_by_port() {
        assert_eq!(SmtpTls::for_port(None), SmtpTls::Implicit);
        assert_eq!(SmtpTls::for_port(Some(465)), SmtpTls::Implicit);
        assert_eq!(SmtpTls::for_port(Some(587)), SmtpTls::StartTls);
        assert_eq!(SmtpTls::for_port(Some(2525)), SmtpTls::StartTls);
    }

    #[tokio::test]
    async fn new_with_starttls_port() {
        let result = EmailServiceImpl::new(EmailServiceConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: Some(587),
            credentials: None,
            from: None,
            timeout: Duration::from_secs(5),
        });

        assert!(result.is_ok());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = SmtpCredentials {
            username: "owner@example.com".into(),
            password: "hunter2".into(),
        };

        let debug = format!("{credentials:?}");

        assert!(debug.contains("owner@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
