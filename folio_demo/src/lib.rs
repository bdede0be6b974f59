//! Fixtures shared by the tests of the other crates.

use std::sync::LazyLock;

use folio_models::{
    contact::{
        ContactAuthor, ContactAuthorName, ContactMessage, ContactSubject, ContactSubmission,
    },
    email_address::{EmailAddress, EmailAddressWithName},
};

pub static OWNER_EMAIL: LazyLock<EmailAddressWithName> = LazyLock::new(|| {
    "owner@example.com"
        .parse::<EmailAddress>()
        .unwrap()
        .with_name("Portfolio".into())
});

pub const OWNER_SIGNATURE: &str = "Portfolio Owner";

pub static CONTACT_JO: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    author: ContactAuthor {
        name: ContactAuthorName::try_new("Jo").unwrap(),
        email: "jo@example.com".parse().unwrap(),
    },
    subject: ContactSubject::try_new("Hi").unwrap(),
    message: ContactMessage::try_new("Hello there!").unwrap(),
});

/// Every field carries markup that has to be escaped before it ends up in an
/// email.
pub static CONTACT_MALLORY: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    author: ContactAuthor {
        name: ContactAuthorName::try_new("<b>Mallory</b> & Co").unwrap(),
        email: "mallory@example.com".parse().unwrap(),
    },
    subject: ContactSubject::try_new("\"Quotes\" & 'apostrophes'").unwrap(),
    message: ContactMessage::try_new("<script>alert(1)</script>\nsecond line").unwrap(),
});
