use crate::{email_address::EmailAddress, macros::nutype_string};

/// A validated contact form submission. Only exists for the duration of a
/// single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub author: ContactAuthor,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAuthor {
    pub name: ContactAuthorName,
    pub email: EmailAddress,
}

nutype_string!(ContactAuthorName(
    sanitize(trim),
    validate(not_empty, len_char_max = 256)
));

nutype_string!(ContactSubject(
    sanitize(trim),
    validate(not_empty, len_char_max = 256)
));

nutype_string!(ContactMessage(
    sanitize(trim),
    validate(not_empty, len_char_max = 4096)
));
