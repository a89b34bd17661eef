use std::{future::Future, net::IpAddr};

use folio_models::contact::{ContactSubmission, RejectionReason};
use thiserror::Error;

pub mod gatekeeper;
pub mod rate_limit;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validates a contact form submission from `client` and delivers it.
    ///
    /// The client's rate limit counters are only advanced after successful
    /// delivery.
    fn send_message(
        &self,
        client: IpAddr,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error(transparent)]
    Rejected(#[from] RejectionReason),
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(
        mut self,
        client: IpAddr,
        submission: ContactSubmission,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(
                mockall::predicate::eq(client),
                mockall::predicate::eq(submission),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
