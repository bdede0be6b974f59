use std::{str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::macros::nutype_string;

/// Accepts anything shaped like `local@domain.tld`. Deliverability is left to
/// the smtp server.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

nutype_string!(EmailAddress(
    sanitize(trim),
    validate(len_char_max = 254, regex = EMAIL_ADDRESS_REGEX)
));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddressWithName {
    pub name: Option<String>,
    pub email: EmailAddress,
}

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self
    }

    pub fn with_name(self, name: String) -> EmailAddressWithName {
        EmailAddressWithName {
            name: Some(name),
            email: self,
        }
    }
}

impl From<EmailAddress> for EmailAddressWithName {
    fn from(email: EmailAddress) -> Self {
        Self { name: None, email }
    }
}

impl FromStr for EmailAddress {
    type Err = EmailAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}
