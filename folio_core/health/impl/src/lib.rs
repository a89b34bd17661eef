use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use folio_di::Build;
use folio_email_contracts::EmailService;
use folio_shared_contracts::time::TimeService;
use folio_storage_contracts::KeyValueStorage;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Build)]
pub struct HealthFeatureServiceImpl<Time, Storage, Email> {
    time: Time,
    storage: Storage,
    email: Email,
    config: HealthFeatureConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl CachedStatus {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now < self.timestamp + ttl
    }
}

impl<Time, Storage, Email> HealthFeatureService for HealthFeatureServiceImpl<Time, Storage, Email>
where
    Time: TimeService,
    Storage: KeyValueStorage,
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let ttl = self.config.cache_ttl;

        if let Some(cached) = self
            .state
            .cache
            .read()
            .await
            .as_ref()
            .filter(|c| c.is_fresh(now, ttl))
        {
            return cached.status;
        }

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| c.is_fresh(now, ttl)) {
            return cached.status;
        }

        let storage = self
            .storage
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping storage: {err:#}"))
            .is_ok();

        let email = self
            .email
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping smtp server: {err:#}"))
            .is_ok();

        cache_guard
            .insert(CachedStatus {
                status: HealthStatus { storage, email },
                timestamp: now,
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use folio_demo::contact::NOW;
    use folio_email_contracts::MockEmailService;
    use folio_shared_contracts::time::MockTimeService;
    use folio_storage_contracts::MockKeyValueStorage;

    use super::*;

    fn config() -> HealthFeatureConfig {
        HealthFeatureConfig {
            cache_ttl: Duration::from_secs(10),
        }
    }

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let sut = HealthFeatureServiceImpl {
            time: MockTimeService::new().with_now(*NOW),
            storage: MockKeyValueStorage::new().with_ping(true),
            email: MockEmailService::new().with_ping(true),
            config: config(),
            state: Default::default(),
        };

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(
            result,
            HealthStatus {
                storage: true,
                email: true
            }
        );
        assert!(result.is_healthy());
    }

    #[tokio::test]
    async fn unhealthy() {
        // Arrange
        let sut = HealthFeatureServiceImpl {
            time: MockTimeService::new().with_now(*NOW),
            storage: MockKeyValueStorage::new().with_ping(true),
            email: MockEmailService::new().with_ping(false),
            config: config(),
            state: Default::default(),
        };

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(
            result,
            HealthStatus {
                storage: true,
                email: false
            }
        );
        assert!(!result.is_healthy());
    }

    #[tokio::test]
    async fn cached() {
        // Arrange
        let mut time = MockTimeService::new();
        let mut seq = mockall::Sequence::new();
        for now in [*NOW, *NOW + TimeDelta::seconds(9), *NOW + TimeDelta::seconds(10)] {
            time.expect_now()
                .once()
                .in_sequence(&mut seq)
                .return_const(now);
        }

        let mut storage = MockKeyValueStorage::new();
        let mut storage_results = [false, true].into_iter();
        storage.expect_ping().times(2).returning(move || {
            let ok = storage_results.next().unwrap_or(true);
            Box::pin(async move {
                if ok {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("read-only file system"))
                }
            })
        });

        let mut email = MockEmailService::new();
        email
            .expect_ping()
            .times(2)
            .returning(|| Box::pin(std::future::ready(Ok(()))));

        let sut = HealthFeatureServiceImpl {
            time,
            storage,
            email,
            config: config(),
            state: Default::default(),
        };

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;
        let third = sut.get_status().await;

        // Assert
        assert!(!first.storage);
        assert_eq!(second, first);
        assert!(third.is_healthy());
    }
}
