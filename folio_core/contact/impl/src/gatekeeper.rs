use std::{
    sync::{Arc, LazyLock},
    time::Duration,
};

use chrono::{DateTime, Utc};
use folio_core_contact_contracts::gatekeeper::ContactGatekeeperService;
use folio_di::Build;
use folio_models::{
    contact::{
        ContactField, ContactMessage, ContactMessageAuthor, ContactSubmission, Evaluation,
        RateLimitState, RejectionReason, ValidationOutcome,
    },
    email_address::EmailAddress,
};
use folio_utils::trace_instrument;
use regex::Regex;
use tracing::debug;

use crate::spam::SpamFilter;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Build)]
pub struct ContactGatekeeperServiceImpl {
    config: ContactGatekeeperConfig,
}

#[derive(Debug, Clone)]
pub struct ContactGatekeeperConfig {
    /// Minimum time between two accepted submissions.
    pub cooldown: Duration,
    /// Length of the rolling window for `daily_limit`.
    pub window: Duration,
    pub daily_limit: u32,
    pub min_message_length: usize,
    pub max_field_length: usize,
    pub max_message_length: usize,
    pub spam_filter: Arc<SpamFilter>,
}

impl ContactGatekeeperService for ContactGatekeeperServiceImpl {
    #[trace_instrument(skip(self, submission))]
    fn evaluate(
        &self,
        submission: &ContactSubmission,
        mut state: RateLimitState,
        now: DateTime<Utc>,
    ) -> Evaluation {
        let outcome = match self.check(submission, &mut state, now) {
            Ok(message) => ValidationOutcome::Allowed(message),
            Err(reason) => ValidationOutcome::Rejected(reason),
        };
        Evaluation { outcome, state }
    }

    #[trace_instrument(skip(self))]
    fn record_acceptance(&self, state: RateLimitState, now: DateTime<Utc>) -> RateLimitState {
        RateLimitState {
            submit_count: state.submit_count.saturating_add(1),
            last_submit_time: Some(now),
        }
    }

    #[trace_instrument(skip(self))]
    fn current_window(&self, mut state: RateLimitState, now: DateTime<Utc>) -> RateLimitState {
        if state
            .last_submit_time
            .is_some_and(|last| (now - last).num_milliseconds() > millis(self.config.window))
        {
            state.submit_count = 0;
        }
        state
    }
}

impl ContactGatekeeperServiceImpl {
    pub fn new(config: ContactGatekeeperConfig) -> Self {
        Self { config }
    }

    fn check(
        &self,
        submission: &ContactSubmission,
        state: &mut RateLimitState,
        now: DateTime<Utc>,
    ) -> Result<ContactMessage, RejectionReason> {
        if let Some(field) = ContactField::ALL
            .into_iter()
            .find(|&field| submission.field(field).trim().is_empty())
        {
            return Err(RejectionReason::MissingField(field));
        }

        let email = parse_email(submission.email.trim()).ok_or(RejectionReason::InvalidEmail)?;

        for field in ContactField::ALL {
            let max_length = match field {
                ContactField::Message => self.config.max_message_length,
                _ => self.config.max_field_length,
            };
            if char_count(submission.field(field)) > max_length {
                return Err(RejectionReason::FieldTooLong(field));
            }
        }

        if char_count(&submission.message) < self.config.min_message_length {
            return Err(RejectionReason::MessageTooShort);
        }

        if let Some(last_submit_time) = state.last_submit_time {
            let elapsed = (now - last_submit_time).num_milliseconds();

            let cooldown = millis(self.config.cooldown);
            if elapsed < cooldown {
                let remaining = cooldown.saturating_sub(elapsed).unsigned_abs();
                return Err(RejectionReason::CooldownActive {
                    seconds_remaining: remaining.div_ceil(1000),
                });
            }
        }

        *state = self.current_window(*state, now);

        if state.submit_count >= self.config.daily_limit {
            return Err(RejectionReason::DailyLimitExceeded);
        }

        if let Some(rule) = [&submission.subject, &submission.message]
            .into_iter()
            .find_map(|text| self.config.spam_filter.find_match(text))
        {
            debug!(%rule, "Submission matched spam rule");
            return Err(RejectionReason::SpamDetected);
        }

        Ok(ContactMessage {
            author: ContactMessageAuthor {
                name: submission
                    .name
                    .clone()
                    .try_into()
                    .map_err(|_| RejectionReason::MissingField(ContactField::Name))?,
                email,
            },
            subject: submission
                .subject
                .clone()
                .try_into()
                .map_err(|_| RejectionReason::MissingField(ContactField::Subject))?,
            content: submission
                .message
                .clone()
                .try_into()
                .map_err(|_| RejectionReason::MissingField(ContactField::Message))?,
        })
    }
}

fn parse_email(email: &str) -> Option<EmailAddress> {
    EMAIL_REGEX
        .is_match(email)
        .then(|| email.parse().ok())
        .flatten()
}

/// Number of characters after trimming surrounding whitespace.
fn char_count(value: &str) -> usize {
    value.trim().chars().count()
}

fn millis(duration: Duration) -> i64 {
    duration.as_millis().try_into().unwrap_or(i64::MAX)
}
