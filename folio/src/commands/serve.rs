use folio_config::Config;
use folio_di::Provide;
use folio_email_contracts::EmailService;
use folio_storage_contracts::KeyValueStorage;
use tracing::{info, warn};

use crate::{
    email,
    environment::{types::RestServer, ConfigProvider, Provider},
    storage,
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!(path = %config.storage.path.display(), "Opening storage");
    let storage = storage::open(&config.storage).await?;
    storage.ping().await?;

    info!("Connecting to smtp server");
    let email = email::connect(&config.email).await?;
    if let Err(err) = email.ping().await {
        warn!("Smtp server is not reachable, contact messages cannot be delivered: {err:#}");
    }

    let config_provider = ConfigProvider::new(&config)?;
    let mut provider = Provider::new(config_provider, storage, email);
    let server: RestServer = provider.provide();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
