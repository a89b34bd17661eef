use std::sync::Arc;

use folio_api_rest::{RestServerConfig, RestServerRealIpConfig};
use folio_config::Config;
use folio_core_contact_impl::{
    gatekeeper::ContactGatekeeperConfig, spam::SpamFilter, ContactFeatureConfig,
};
use folio_core_health_impl::HealthFeatureConfig;
use folio_core_projects_impl::ProjectsFeatureConfig;
use folio_di::provider;
use types::{Email, Storage};

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        storage: Storage,
        email: Email,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Core
            ContactFeatureConfig,
            ContactGatekeeperConfig,
            HealthFeatureConfig,
            ProjectsFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, storage: Storage, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            storage,
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider for commands that only need the storage, not the smtp connection
    pub StorageProvider {
        storage: Storage,
        ..config: ConfigProvider {
            ContactGatekeeperConfig,
        }
    }
}

impl StorageProvider {
    pub fn new(config: ConfigProvider, storage: Storage) -> Self {
        Self {
            _cache: Default::default(),
            storage,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
        contact_gatekeeper_config: ContactGatekeeperConfig,
        health_feature_config: HealthFeatureConfig,
        projects_feature_config: ProjectsFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig {
            addr: config.http.host,
            port: config.http.port,
            real_ip: config.http.real_ip.as_ref().map(|real_ip| {
                Arc::new(RestServerRealIpConfig {
                    header: real_ip.header.clone(),
                    set_from: real_ip.set_from,
                })
            }),
        };

        // Core
        let contact = &config.contact;

        let contact_feature_config = ContactFeatureConfig {
            email: contact.email.clone().into(),
        };

        let contact_gatekeeper_config = ContactGatekeeperConfig {
            cooldown: *contact.cooldown,
            window: *contact.window,
            daily_limit: contact.daily_limit,
            min_message_length: contact.min_message_length,
            max_field_length: contact.max_field_length,
            max_message_length: contact.max_message_length,
            spam_filter: SpamFilter::new(
                &contact.spam.shorteners,
                &contact.spam.keywords,
                contact.spam.repeated_char_run,
            )?
            .into(),
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: *config.health.cache_ttl,
        };

        let projects_feature_config = ProjectsFeatureConfig {
            projects: config.projects.as_slice().into(),
        };

        Ok(Self {
            _cache: Default::default(),
            rest_server_config,
            contact_feature_config,
            contact_gatekeeper_config,
            health_feature_config,
            projects_feature_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use folio_di::Provide;
    use folio_email_impl::EmailServiceImpl;
    use folio_storage_file::FileStorage;

    use super::{
        types::{ContactGatekeeper, ContactRateLimit, RestServer},
        *,
    };

    fn config_provider() -> ConfigProvider {
        let config = folio_config::load(&[Path::new(folio_config::DEFAULT_CONFIG_PATH)]).unwrap();
        ConfigProvider::new(&config).unwrap()
    }

    async fn storage() -> FileStorage {
        FileStorage::open(
            std::env::temp_dir()
                .join(format!("folio-{}", uuid::Uuid::new_v4()))
                .join("state.json"),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn provide_rest_server() {
        let email = EmailServiceImpl::dummy().await;

        let mut provider = Provider::new(config_provider(), storage().await, email);
        let _: RestServer = provider.provide();
    }

    #[tokio::test]
    async fn provide_contact_services_without_email() {
        let mut provider = StorageProvider::new(config_provider(), storage().await);
        let _: ContactRateLimit = provider.provide();
        let _: ContactGatekeeper = provider.provide();
    }
}
