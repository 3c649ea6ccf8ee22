// Participant module

use std::fmt;

use serde::Serialize;

/// A participant identified by an email address that passed validation.
///
/// Construction goes through `ParticipantList`, which trims the input and
/// runs it past an `EmailValidator` first. Serialize-only so that no
/// address bypasses that check.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Participant {
    email: String,
}

impl Participant {
    pub(crate) fn from_validated(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Case-insensitive address comparison used for deduplication.
    pub fn matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.email)
    }
}

impl Eq for Participant {}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}
