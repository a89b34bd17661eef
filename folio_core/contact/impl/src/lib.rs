use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use folio_core_contact_contracts::{
    gatekeeper::ContactGatekeeperService, rate_limit::ContactRateLimitService,
    ContactFeatureService, ContactSendMessageError,
};
use folio_di::Build;
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::{
    contact::{ContactMessage, ContactSubmission, ValidationOutcome},
    email_address::EmailAddress,
};
use folio_shared_contracts::time::TimeService;
use folio_utils::trace_instrument;
use tracing::{error, info, Instrument};

use crate::client_lock::ClientLocks;

mod client_lock;
pub mod gatekeeper;
pub mod rate_limit;
pub mod spam;

#[derive(Debug, Build)]
pub struct ContactFeatureServiceImpl<Time, Email, Gatekeeper, RateLimit> {
    time: Arc<Time>,
    email: Arc<Email>,
    gatekeeper: Arc<Gatekeeper>,
    rate_limit: Arc<RateLimit>,
    config: ContactFeatureConfig,
    #[state]
    locks: Arc<ClientLocks>,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Recipient of all contact form messages.
    pub email: Arc<EmailAddress>,
}

impl<Time, EmailS, Gatekeeper, RateLimit> Clone
    for ContactFeatureServiceImpl<Time, EmailS, Gatekeeper, RateLimit>
{
    fn clone(&self) -> Self {
        Self {
            time: Arc::clone(&self.time),
            email: Arc::clone(&self.email),
            gatekeeper: Arc::clone(&self.gatekeeper),
            rate_limit: Arc::clone(&self.rate_limit),
            config: self.config.clone(),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<Time, EmailS, Gatekeeper, RateLimit> ContactFeatureService
    for ContactFeatureServiceImpl<Time, EmailS, Gatekeeper, RateLimit>
where
    Time: TimeService,
    EmailS: EmailService,
    Gatekeeper: ContactGatekeeperService,
    RateLimit: ContactRateLimitService,
{
    /// Runs on a separate task, so a dropped request cannot interrupt a
    /// delivery before it is recorded.
    #[trace_instrument(skip(self, submission))]
    async fn send_message(
        &self,
        client: IpAddr,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        tokio::spawn(self.clone().process(client, submission).in_current_span())
            .await
            .context("Contact message task failed")?
    }
}

impl<Time, EmailS, Gatekeeper, RateLimit>
    ContactFeatureServiceImpl<Time, EmailS, Gatekeeper, RateLimit>
where
    Time: TimeService,
    EmailS: EmailService,
    Gatekeeper: ContactGatekeeperService,
    RateLimit: ContactRateLimitService,
{
    async fn process(
        self,
        client: IpAddr,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let _guard = self.locks.lock(client).await;

        let state = self.rate_limit.load(client).await?;
        let now = self.time.now();
        let evaluation = self.gatekeeper.evaluate(&submission, state, now);

        if evaluation.state != state {
            self.rate_limit.save(client, evaluation.state).await?;
        }

        let message = match evaluation.outcome {
            ValidationOutcome::Allowed(message) => message,
            ValidationOutcome::Rejected(reason) => {
                info!(%reason, "Contact message rejected");
                return Err(reason.into());
            }
        };

        match self.email.send(self.make_email(message)).await {
            Ok(true) => {}
            Ok(false) => {
                error!("Contact message was rejected by the smtp server");
                return Err(ContactSendMessageError::Send);
            }
            Err(err) => {
                error!("Failed to send contact message: {err:#}");
                return Err(ContactSendMessageError::Send);
            }
        }

        let state = self.gatekeeper.record_acceptance(evaluation.state, now);
        if let Err(err) = self.rate_limit.save(client, state).await {
            error!("Contact message was sent but could not be recorded: {err:#}");
        }

        info!(submit_count = state.submit_count, "Contact message sent");

        Ok(())
    }

    fn make_email(&self, message: ContactMessage) -> Email {
        Email {
            recipient: (*self.config.email).clone(),
            subject: format!("[Contact Form] {}", *message.subject),
            body: format!(
                "Message from {} ({}):\n\n{}",
                *message.author.name, message.author.email, *message.content
            ),
            content_type: ContentType::Text,
            reply_to: Some(message.author.email),
        }
    }
}
