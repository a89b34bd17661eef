use anyhow::anyhow;
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::email_address::EmailAddress;
use folio_utils::{trace_instrument, Apply};
use lettre::{
    message::{header, MessageBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    pub async fn new(url: &str, from: EmailAddress) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();

        Ok(Self { from, transport })
    }

    #[cfg(feature = "dummy")]
    pub async fn dummy() -> Self {
        Self::new("smtp://dummy", "dummy@example.com".parse().unwrap())
            .await
            .unwrap()
    }
}

impl EmailService for EmailServiceImpl {
    #[trace_instrument(skip(self, email), fields(subject = %email.subject))]
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = build_message(&self.from, email)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn build_message(from: &EmailAddress, email: Email) -> anyhow::Result<Message> {
    Message::builder()
        .from(from.0.clone().into())
        .to(email.recipient.0.into())
        .apply_map(email.reply_to.map(|x| x.0.into()), MessageBuilder::reply_to)
        .subject(email.subject)
        .header(match email.content_type {
            ContentType::Text => header::ContentType::TEXT_PLAIN,
            ContentType::Html => header::ContentType::TEXT_HTML,
        })
        .body(email.body)
        .map_err(Into::into)
}
