use std::sync::Arc;

use anyhow::Context;
use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_email_contracts::template::TemplateEmailService;
use folio_models::{contact::ContactSubmission, email_address::EmailAddressWithName};
use folio_templates_contracts::{ContactConfirmationTemplate, ContactNotificationTemplate};
use folio_utils::html;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<TemplateEmail> {
    template_email: TemplateEmail,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Receives the notification for every submission.
    pub recipient: Option<Arc<EmailAddressWithName>>,
    /// Name used to sign the confirmation email.
    pub signature: Arc<String>,
}

impl<TemplateEmail> ContactFeatureServiceImpl<TemplateEmail> {
    pub fn new(template_email: TemplateEmail, config: ContactFeatureConfig) -> Self {
        Self {
            template_email,
            config,
        }
    }
}

impl<TemplateEmail> ContactFeatureService for ContactFeatureServiceImpl<TemplateEmail>
where
    TemplateEmail: TemplateEmailService,
{
    #[tracing::instrument(skip_all, fields(author = submission.author.email.as_str()))]
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let recipient = self
            .config
            .recipient
            .as_deref()
            .cloned()
            .context("No contact recipient configured")?;

        let ContactSubmission {
            author,
            subject,
            message,
        } = submission;

        let name = html::escape(&author.name).into_owned();
        let subject_html = html::escape(&subject).into_owned();
        let message_html = html::escape_multiline(&message);

        let notification = ContactNotificationTemplate {
            name: name.clone(),
            email: html::escape(&author.email).into_owned(),
            subject: subject_html.clone(),
            message: message_html.clone(),
        };

        let author_email = author.email.with_name(author.name.into_inner());

        let accepted = self
            .template_email
            .send_contact_notification_email(
                recipient,
                author_email.clone(),
                &subject,
                &notification,
            )
            .await
            .context("Failed to send contact notification email")?;
        if !accepted {
            warn!("smtp server did not accept the contact notification email");
            return Err(ContactSendMessageError::Send);
        }
        info!("Contact notification email sent");

        let confirmation = ContactConfirmationTemplate {
            name,
            subject: subject_html,
            message: message_html,
            signature: html::escape(&self.config.signature).into_owned(),
        };

        let accepted = self
            .template_email
            .send_contact_confirmation_email(author_email, &confirmation)
            .await
            .context("Failed to send contact confirmation email")?;
        if !accepted {
            warn!("smtp server did not accept the contact confirmation email");
            return Err(ContactSendMessageError::Send);
        }
        info!("Contact confirmation email sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use folio_demo::{CONTACT_JO, CONTACT_MALLORY, OWNER_EMAIL, OWNER_SIGNATURE};
    use folio_email_contracts::template::MockTemplateEmailService;
    use folio_utils::assert_matches;

    use super::*;

    fn config() -> ContactFeatureConfig {
        ContactFeatureConfig {
            recipient: Some(Arc::new(OWNER_EMAIL.clone())),
            signature: Arc::new(OWNER_SIGNATURE.into()),
        }
    }

    fn jo() -> EmailAddressWithName {
        "jo@example.com"
            .parse::<folio_models::email_address::EmailAddress>()
            .unwrap()
            .with_name("Jo".into())
    }

    fn jo_notification() -> ContactNotificationTemplate {
        ContactNotificationTemplate {
            name: "Jo".into(),
            email: "jo@example.com".into(),
            subject: "Hi".into(),
            message: "Hello there!".into(),
        }
    }

    fn jo_confirmation() -> ContactConfirmationTemplate {
        ContactConfirmationTemplate {
            name: "Jo".into(),
            subject: "Hi".into(),
            message: "Hello there!".into(),
            signature: OWNER_SIGNATURE.into(),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let template_email = MockTemplateEmailService::new()
            .with_send_contact_notification_email(
                OWNER_EMAIL.clone(),
                jo(),
                "Hi".into(),
                jo_notification(),
                Ok(true),
            )
            .with_send_contact_confirmation_email(jo(), jo_confirmation(), Ok(true));

        let sut = ContactFeatureServiceImpl::new(template_email, config());

        // Act
        let result = sut.send_message(CONTACT_JO.clone()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn escapes_all_fields() {
        // Arrange
        let mallory = "mallory@example.com"
            .parse::<folio_models::email_address::EmailAddress>()
            .unwrap()
            .with_name("<b>Mallory</b> & Co".into());

        let template_email = MockTemplateEmailService::new()
            .with_send_contact_notification_email(
                OWNER_EMAIL.clone(),
                mallory.clone(),
                "\"Quotes\" & 'apostrophes'".into(),
                ContactNotificationTemplate {
                    name: "&lt;b&gt;Mallory&lt;/b&gt; &amp; Co".into(),
                    email: "mallory@example.com".into(),
                    subject: "&quot;Quotes&quot; &amp; &#039;apostrophes&#039;".into(),
                    message: "&lt;script&gt;alert(1)&lt;/script&gt;<br>second line".into(),
                },
                Ok(true),
            )
            .with_send_contact_confirmation_email(
                mallory,
                ContactConfirmationTemplate {
                    name: "&lt;b&gt;Mallory&lt;/b&gt; &amp; Co".into(),
                    subject: "&quot;Quotes&quot; &amp; &#039;apostrophes&#039;".into(),
                    message: "&lt;script&gt;alert(1)&lt;/script&gt;<br>second line".into(),
                    signature: OWNER_SIGNATURE.into(),
                },
                Ok(true),
            );

        let sut = ContactFeatureServiceImpl::new(template_email, config());

        // Act
        let result = sut.send_message(CONTACT_MALLORY.clone()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn notification_rejected() {
        // Arrange
        let template_email = MockTemplateEmailService::new().with_send_contact_notification_email(
            OWNER_EMAIL.clone(),
            jo(),
            "Hi".into(),
            jo_notification(),
            Ok(false),
        );

        let sut = ContactFeatureServiceImpl::new(template_email, config());

        // Act
        let result = sut.send_message(CONTACT_JO.clone()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Send));
    }

    #[tokio::test]
    async fn notification_error() {
        // Arrange
        let template_email = MockTemplateEmailService::new().with_send_contact_notification_email(
            OWNER_EMAIL.clone(),
            jo(),
            "Hi".into(),
            jo_notification(),
            Err(anyhow!("connection refused")),
        );

        let sut = ContactFeatureServiceImpl::new(template_email, config());

        // Act
        let result = sut.send_message(CONTACT_JO.clone()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Other(_)));
    }

    #[tokio::test]
    async fn confirmation_rejected() {
        // Arrange
        let template_email = MockTemplateEmailService::new()
            .with_send_contact_notification_email(
                OWNER_EMAIL.clone(),
                jo(),
                "Hi".into(),
                jo_notification(),
                Ok(true),
            )
            .with_send_contact_confirmation_email(jo(), jo_confirmation(), Ok(false));

        let sut = ContactFeatureServiceImpl::new(template_email, config());

        // Act
        let result = sut.send_message(CONTACT_JO.clone()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Send));
    }

    #[tokio::test]
    async fn no_recipient_configured() {
        // Arrange
        let config = ContactFeatureConfig {
            recipient: None,
            ..config()
        };
        let sut = ContactFeatureServiceImpl::new(MockTemplateEmailService::new(), config);

        // Act
        let result = sut.send_message(CONTACT_JO.clone()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Other(_)));
    }

    #[tokio::test]
    async fn duplicate_submissions_send_twice() {
        // Arrange
        let mut template_email = MockTemplateEmailService::new();
        template_email
            .expect_send_contact_notification_email()
            .times(2)
            .returning(|_, _, _, _| Box::pin(std::future::ready(Ok(true))));
        template_email
            .expect_send_contact_confirmation_email()
            .times(2)
            .returning(|_, _| Box::pin(std::future::ready(Ok(true))));

        let sut = ContactFeatureServiceImpl::new(template_email, config());

        // Act
        let first = sut.send_message(CONTACT_JO.clone()).await;
        let second = sut.send_message(CONTACT_JO.clone()).await;

        // Assert
        first.unwrap();
        second.unwrap();
    }
}
