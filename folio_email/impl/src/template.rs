use folio_email_contracts::{template::TemplateEmailService, ContentType, Email, EmailService};
use folio_models::email_address::EmailAddressWithName;
use folio_templates_contracts::{
    ContactConfirmationTemplate, ContactNotificationTemplate, Template, TemplateService,
};

#[derive(Debug, Clone)]
pub struct TemplateEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS> {
    pub fn new(email: EmailS, template: TemplateS) -> Self {
        Self { email, template }
    }
}

pub const CONTACT_NOTIFICATION_SUBJECT_PREFIX: &str = "New Contact Form Submission: ";
pub const CONTACT_CONFIRMATION_SUBJECT: &str = "Message Received - Portfolio Contact Form";

impl<EmailS, TemplateS> TemplateEmailService for TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_contact_notification_email(
        &self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        subject: &str,
        data: &ContactNotificationTemplate,
    ) -> anyhow::Result<bool> {
        self.send_email(
            recipient,
            Some(reply_to),
            data,
            format!("{CONTACT_NOTIFICATION_SUBJECT_PREFIX}{subject}"),
        )
        .await
    }

    async fn send_contact_confirmation_email(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactConfirmationTemplate,
    ) -> anyhow::Result<bool> {
        self.send_email(recipient, None, data, CONTACT_CONFIRMATION_SUBJECT)
            .await
    }
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipient: EmailAddressWithName,
        reply_to: Option<EmailAddressWithName>,
        data: &T,
        subject: impl Into<String>,
    ) -> anyhow::Result<bool> {
        self.email
            .send(Email {
                recipient,
                subject: subject.into(),
                body: self.template.render(data)?,
                content_type: ContentType::Html,
                reply_to,
            })
            .await
    }
}
