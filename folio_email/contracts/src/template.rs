use std::future::Future;

use folio_models::email_address::EmailAddressWithName;
use folio_templates_contracts::{ContactConfirmationTemplate, ContactNotificationTemplate};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateEmailService: Send + Sync + 'static {
    fn send_contact_notification_email(
        &self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        subject: &str,
        data: &ContactNotificationTemplate,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;

    fn send_contact_confirmation_email(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactConfirmationTemplate,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockTemplateEmailService {
    pub fn with_send_contact_notification_email(
        mut self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        subject: String,
        data: ContactNotificationTemplate,
        result: anyhow::Result<bool>,
    ) -> Self {
        self.expect_send_contact_notification_email()
            .once()
            .withf(move |r, rt, s, d| *r == recipient && *rt == reply_to && s == subject && *d == data)
            .return_once(move |_, _, _, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_send_contact_confirmation_email(
        mut self,
        recipient: EmailAddressWithName,
        data: ContactConfirmationTemplate,
        result: anyhow::Result<bool>,
    ) -> Self {
        self.expect_send_contact_confirmation_email()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
