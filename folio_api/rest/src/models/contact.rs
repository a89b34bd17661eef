use folio_models::contact::{ContactSubmission, RejectionReason};
use serde::{Deserialize, Serialize};

/// Contact form as posted by the frontend. Missing fields are treated as
/// empty so they are reported like blank ones.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactSuccess {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiContactRejection {
    pub detail: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl From<RejectionReason> for ApiContactRejection {
    fn from(value: RejectionReason) -> Self {
        let (detail, field, retry_after) = match value {
            RejectionReason::MissingField(field) => ("missing_field", Some(field.as_str()), None),
            RejectionReason::InvalidEmail => ("invalid_email", None, None),
            RejectionReason::FieldTooLong(field) => ("field_too_long", Some(field.as_str()), None),
            RejectionReason::MessageTooShort => ("message_too_short", None, None),
            RejectionReason::CooldownActive { seconds_remaining } => {
                ("cooldown_active", None, Some(seconds_remaining))
            }
            RejectionReason::DailyLimitExceeded => ("daily_limit_exceeded", None, None),
            RejectionReason::SpamDetected => ("spam_detected", None, None),
        };

        Self {
            detail,
            message: value.to_string(),
            field,
            retry_after,
        }
    }
}
