use std::net::IpAddr;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use folio_config::Config;
use folio_core_contact_contracts::{
    gatekeeper::ContactGatekeeperService, rate_limit::ContactRateLimitService,
};
use folio_di::Provide;
use folio_models::contact::RateLimitState;
use folio_shared_contracts::time::TimeService;

use crate::{
    environment::{
        types::{ContactGatekeeper, ContactRateLimit, Time},
        ConfigProvider, StorageProvider,
    },
    storage,
};

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Show the stored rate limit state of a client
    #[command(aliases(["s"]))]
    Status { client: IpAddr },
    /// Clear the stored rate limit state of a client
    #[command(aliases(["r"]))]
    Reset { client: IpAddr },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let storage = storage::open(&config.storage).await?;
        let mut provider = StorageProvider::new(ConfigProvider::new(&config)?, storage);
        let rate_limit: ContactRateLimit = provider.provide();

        match self {
            ContactCommand::Status { client } => {
                let gatekeeper: ContactGatekeeper = provider.provide();
                let time: Time = provider.provide();

                let state = rate_limit.load(client).await?;
                println!(
                    "{}",
                    describe(&gatekeeper, config.contact.daily_limit, state, time.now())
                );
            }
            ContactCommand::Reset { client } => {
                rate_limit.reset(client).await?;
                println!("Rate limit of {client} has been reset");
            }
        }

        Ok(())
    }
}

fn describe(
    gatekeeper: &impl ContactGatekeeperService,
    daily_limit: u32,
    state: RateLimitState,
    now: DateTime<Utc>,
) -> String {
    let Some(last_submit_time) = state.last_submit_time else {
        return "No messages sent".into();
    };

    let count = gatekeeper.current_window(state, now).submit_count;

    format!(
        "Messages in current window: {count}/{daily_limit}\nLast message sent at: \
         {last_submit_time}"
    )
}
