use std::fmt;

use chrono::{DateTime, Utc};
use nutype::nutype;
use thiserror::Error;

use crate::email_address::EmailAddress;

/// Raw contact form input, exactly as entered by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    /// All fields in the order they are validated.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contact message that passed validation and is ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

/// Per-client submission counters, persisted between requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitState {
    /// Accepted submissions within the current rolling window.
    pub submit_count: u32,
    /// Time of the most recent accepted submission.
    pub last_submit_time: Option<DateTime<Utc>>,
}

/// Result of a single gatekeeping decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Allowed(ContactMessage),
    Rejected(RejectionReason),
}

impl ValidationOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    pub fn reason(&self) -> Option<RejectionReason> {
        match self {
            Self::Allowed(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// Output of the gatekeeper: the decision and the rate limit state after the
/// rolling window has been applied. The state differs from the input only if
/// the window expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: ValidationOutcome,
    pub state: RateLimitState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("Please fill in the {0} field.")]
    MissingField(ContactField),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("The {0} field is too long.")]
    FieldTooLong(ContactField),
    #[error("Your message is too short. Please write a few more words.")]
    MessageTooShort,
    #[error("Please wait {seconds_remaining} seconds before sending another message.")]
    CooldownActive { seconds_remaining: u64 },
    #[error("You have reached the daily message limit. Please try again tomorrow.")]
    DailyLimitExceeded,
    #[error("Your message looks like spam. Please remove links and try again.")]
    SpamDetected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_trims() {
        let name = ContactMessageAuthorName::try_new("  Jane  ").unwrap();
        assert_eq!(*name, "Jane");
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(ContactMessageSubject::try_new(" \t\n").is_err());
    }

    #[test]
    fn outcome_reason() {
        let rejected =
            ValidationOutcome::Rejected(RejectionReason::MissingField(ContactField::Email));
        assert!(!rejected.is_allowed());
        assert_eq!(
            rejected.reason(),
            Some(RejectionReason::MissingField(ContactField::Email))
        );
    }

    #[test]
    fn reason_messages() {
        assert_eq!(
            RejectionReason::MissingField(ContactField::Subject).to_string(),
            "Please fill in the subject field."
        );
        assert_eq!(
            RejectionReason::CooldownActive {
                seconds_remaining: 42
            }
            .to_string(),
            "Please wait 42 seconds before sending another message."
        );
    }
}
