use folio_models::{
    contact::{ContactAuthor, ContactAuthorName, ContactMessage, ContactSubject, ContactSubmission},
    email_address::EmailAddress,
};
use serde::Deserialize;

use crate::errors::{ALL_FIELDS_REQUIRED, FIELD_TOO_LONG, INVALID_EMAIL_FORMAT};

/// The request body of the contact form. Fields stay optional here so that a
/// missing field and an empty one produce the same error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactMessage {
    /// Full name of the author
    pub name: Option<String>,
    /// Email address of the author
    pub email: Option<String>,
    /// Subject of the message
    pub subject: Option<String>,
    /// Content of the message
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiContactMessageError {
    MissingField,
    InvalidEmail,
    TooLong,
}

impl ApiContactMessageError {
    pub fn detail(self) -> &'static str {
        match self {
            Self::MissingField => ALL_FIELDS_REQUIRED,
            Self::InvalidEmail => INVALID_EMAIL_FORMAT,
            Self::TooLong => FIELD_TOO_LONG,
        }
    }
}

impl TryFrom<ApiContactMessage> for ContactSubmission {
    type Error = ApiContactMessageError;

    fn try_from(value: ApiContactMessage) -> Result<Self, Self::Error> {
        let present = |field: Option<String>| {
            field
                .filter(|x| !x.trim().is_empty())
                .ok_or(ApiContactMessageError::MissingField)
        };
        let name = present(value.name)?;
        let email = present(value.email)?;
        let subject = present(value.subject)?;
        let message = present(value.message)?;

        let email = EmailAddress::try_new(email).map_err(|_| ApiContactMessageError::InvalidEmail)?;

        Ok(Self {
            author: ContactAuthor {
                name: ContactAuthorName::try_new(name)
                    .map_err(|_| ApiContactMessageError::TooLong)?,
                email,
            },
            subject: ContactSubject::try_new(subject)
                .map_err(|_| ApiContactMessageError::TooLong)?,
            message: ContactMessage::try_new(message)
                .map_err(|_| ApiContactMessageError::TooLong)?,
        })
    }
}
