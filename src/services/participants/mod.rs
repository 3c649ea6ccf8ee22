//! Participant email list with validation and deduplication.

use regex::Regex;
use thiserror::Error;

use crate::models::participant::Participant;

/// Syntactic email check supplied by the host application.
pub trait EmailValidator {
    fn validate(&self, candidate: &str) -> bool;
}

/// `local@domain.tld` check: no whitespace, one `@`, a dotted domain.
pub struct RegexEmailValidator {
    pattern: Regex,
}

impl RegexEmailValidator {
    pub fn new() -> Self {
        let pattern = Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$")
            .expect("built-in email pattern is valid");
        Self { pattern }
    }
}

impl Default for RegexEmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailValidator for RegexEmailValidator {
    fn validate(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }
}

impl<F> EmailValidator for F
where
    F: Fn(&str) -> bool,
{
    fn validate(&self, candidate: &str) -> bool {
        self(candidate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParticipantError {
    #[error("email address cannot be empty")]
    Empty,
    #[error("invalid email address: {0}")]
    Invalid(String),
    #[error("participant limit of {0} reached")]
    LimitReached(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(Participant),
    /// The address (compared case-insensitively) is already listed.
    Duplicate,
}

pub struct ParticipantList {
    participants: Vec<Participant>,
    validator: Box<dyn EmailValidator>,
    max_participants: usize,
}

impl ParticipantList {
    pub fn new(max_participants: usize) -> Self {
        Self::with_validator(max_participants, RegexEmailValidator::new())
    }

    pub fn with_validator(max_participants: usize, validator: impl EmailValidator + 'static) -> Self {
        Self {
            participants: Vec::new(),
            validator: Box::new(validator),
            max_participants,
        }
    }

    /// Validate and append an address.
    ///
    /// Validation runs before the duplicate check, and the duplicate check
    /// before the limit, so re-adding a listed address at the limit reports
    /// `Duplicate` rather than an error.
    pub fn add(&mut self, raw: &str) -> Result<AddOutcome, ParticipantError> {
        let email = raw.trim();
        if email.is_empty() {
            return Err(ParticipantError::Empty);
        }
        if !self.validator.validate(email) {
            return Err(ParticipantError::Invalid(email.to_string()));
        }
        if self.contains(email) {
            log::debug!("Ignoring duplicate participant {}", email);
            return Ok(AddOutcome::Duplicate);
        }
        if self.participants.len() >= self.max_participants {
            return Err(ParticipantError::LimitReached(self.max_participants));
        }

        let participant = Participant::from_validated(email);
        self.participants.push(participant.clone());
        Ok(AddOutcome::Added(participant))
    }

    /// Remove an address; returns the removed participant if it was listed.
    pub fn remove(&mut self, email: &str) -> Option<Participant> {
        let index = self.participants.iter().position(|p| p.matches(email))?;
        Some(self.participants.remove(index))
    }

    pub fn contains(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p.matches(email))
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn emails(&self) -> Vec<&str> {
        self.participants.iter().map(Participant::email).collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn clear(&mut self) {
        self.participants.clear();
    }
}
