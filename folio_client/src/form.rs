use folio_models::email_address::EMAIL_ADDRESS_REGEX;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NAME_MIN_LEN: usize = 2;
pub const SUBJECT_MIN_LEN: usize = 3;
pub const MESSAGE_MIN_LEN: usize = 10;

/// The raw contents of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Reasons to keep a submission from leaving the client. The messages are
/// shown inline next to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactFormError {
    #[error("Please enter your name (at least 2 characters)")]
    Name,
    #[error("Please enter a valid email address")]
    Email,
    #[error("Subject must be at least 3 characters long")]
    Subject,
    #[error("Message must be at least 10 characters long")]
    Message,
}

impl ContactForm {
    /// Copy of the form with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().into(),
            email: self.email.trim().into(),
            subject: self.subject.trim().into(),
            message: self.message.trim().into(),
        }
    }

    /// Check the form the way the user sees it, i.e. with trimmed fields.
    /// Reports the first offending field in form order.
    pub fn validate(&self) -> Result<(), ContactFormError> {
        let form = self.trimmed();
        let long_enough = |s: &str, min: usize| s.chars().count() >= min;

        if !long_enough(&form.name, NAME_MIN_LEN) {
            return Err(ContactFormError::Name);
        }
        if !EMAIL_ADDRESS_REGEX.is_match(&form.email) {
            return Err(ContactFormError::Email);
        }
        if !long_enough(&form.subject, SUBJECT_MIN_LEN) {
            return Err(ContactFormError::Subject);
        }
        if !long_enough(&form.message, MESSAGE_MIN_LEN) {
            return Err(ContactFormError::Message);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
