use std::net::IpAddr;

use anyhow::Context;
use chrono::DateTime;
use folio_core_contact_contracts::rate_limit::ContactRateLimitService;
use folio_di::Build;
use folio_models::contact::RateLimitState;
use folio_shared_contracts::hash::HashService;
use folio_storage_contracts::KeyValueStorage;
use folio_utils::trace_instrument;
use tracing::warn;

#[derive(Debug, Clone, Build)]
pub struct ContactRateLimitServiceImpl<Hash, Storage> {
    hash: Hash,
    storage: Storage,
}

impl<Hash, Storage> ContactRateLimitService for ContactRateLimitServiceImpl<Hash, Storage>
where
    Hash: HashService,
    Storage: KeyValueStorage,
{
    #[trace_instrument(skip(self))]
    async fn load(&self, client: IpAddr) -> anyhow::Result<RateLimitState> {
        let keys = self.storage_keys(client);

        let submit_count = self
            .storage
            .get(&keys.submit_count)
            .await
            .context("Failed to get submit count from storage")?
            .and_then(|value| {
                value
                    .parse::<u32>()
                    .inspect_err(|err| warn!(%value, "Ignoring invalid submit count: {err}"))
                    .ok()
            })
            .unwrap_or(0);

        let last_submit_time = self
            .storage
            .get(&keys.last_submit_time)
            .await
            .context("Failed to get last submit time from storage")?
            .and_then(|value| {
                let time = value.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis);
                if time.is_none() {
                    warn!(%value, "Ignoring invalid last submit time");
                }
                time
            });

        Ok(RateLimitState {
            submit_count,
            last_submit_time,
        })
    }

    #[trace_instrument(skip(self))]
    async fn save(&self, client: IpAddr, state: RateLimitState) -> anyhow::Result<()> {
        let keys = self.storage_keys(client);

        self.storage
            .set(&keys.submit_count, &state.submit_count.to_string())
            .await
            .context("Failed to save submit count in storage")?;

        match state.last_submit_time {
            Some(time) => self
                .storage
                .set(&keys.last_submit_time, &time.timestamp_millis().to_string())
                .await
                .context("Failed to save last submit time in storage"),
            None => self
                .storage
                .remove(&keys.last_submit_time)
                .await
                .context("Failed to remove last submit time from storage"),
        }
    }

    #[trace_instrument(skip(self))]
    async fn reset(&self, client: IpAddr) -> anyhow::Result<()> {
        let keys = self.storage_keys(client);

        self.storage
            .remove(&keys.submit_count)
            .await
            .context("Failed to remove submit count from storage")?;
        self.storage
            .remove(&keys.last_submit_time)
            .await
            .context("Failed to remove last submit time from storage")
    }
}

struct StorageKeys {
    submit_count: String,
    last_submit_time: String,
}

impl<Hash, Storage> ContactRateLimitServiceImpl<Hash, Storage>
where
    Hash: HashService,
{
    fn storage_keys(&self, client: IpAddr) -> StorageKeys {
        let hash = hex::encode(self.hash.sha256(client.to_string().as_bytes()).0);
        StorageKeys {
            submit_count: format!("contactSubmitCount:{hash}"),
            last_submit_time: format!("lastSubmitTime:{hash}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_demo::{contact::CLIENT, SHA256HASH1, SHA256HASH1_HEX};
    use folio_shared_contracts::hash::MockHashService;
    use folio_storage_contracts::MockKeyValueStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn hash() -> MockHashService {
        MockHashService::new().with_sha256(CLIENT.to_string().into_bytes(), *SHA256HASH1)
    }

    fn count_key() -> String {
        format!("contactSubmitCount:{SHA256HASH1_HEX}")
    }

    fn time_key() -> String {
        format!("lastSubmitTime:{SHA256HASH1_HEX}")
    }

    #[tokio::test]
    async fn load() {
        // Arrange
        let storage = MockKeyValueStorage::new()
            .with_get(count_key(), Some("3".into()))
            .with_get(time_key(), Some("1700000000000".into()));

        let sut = ContactRateLimitServiceImpl {
            hash: hash(),
            storage,
        };

        // Act
        let result = sut.load(*CLIENT).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            RateLimitState {
                submit_count: 3,
                last_submit_time: DateTime::from_timestamp_millis(1_700_000_000_000),
            }
        );
    }

    #[tokio::test]
    async fn load_empty() {
        // Arrange
        let storage = MockKeyValueStorage::new()
            .with_get(count_key(), None)
            .with_get(time_key(), None);

        let sut = ContactRateLimitServiceImpl {
            hash: hash(),
            storage,
        };

        // Act
        let result = sut.load(*CLIENT).await;

        // Assert
        assert_eq!(result.unwrap(), RateLimitState::default());
    }

    #[tokio::test]
    async fn load_invalid() {
        // Arrange
        let storage = MockKeyValueStorage::new()
            .with_get(count_key(), Some("many".into()))
            .with_get(time_key(), Some("yesterday".into()));

        let sut = ContactRateLimitServiceImpl {
            hash: hash(),
            storage,
        };

        // Act
        let result = sut.load(*CLIENT).await;

        // Assert
        assert_eq!(result.unwrap(), RateLimitState::default());
    }

    #[tokio::test]
    async fn save() {
        // Arrange
        let storage = MockKeyValueStorage::new()
            .with_set(count_key(), "2".into())
            .with_set(time_key(), "1700000000000".into());

        let sut = ContactRateLimitServiceImpl {
            hash: hash(),
            storage,
        };

        // Act
        let result = sut
            .save(
                *CLIENT,
                RateLimitState {
                    submit_count: 2,
                    last_submit_time: DateTime::from_timestamp_millis(1_700_000_000_000),
                },
            )
            .await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn save_without_time() {
        // Arrange
        let storage = MockKeyValueStorage::new()
            .with_set(count_key(), "0".into())
            .with_remove(time_key());

        let sut = ContactRateLimitServiceImpl {
            hash: hash(),
            storage,
        };

        // Act
        let result = sut.save(*CLIENT, RateLimitState::default()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn reset() {
        // Arrange
        let storage = MockKeyValueStorage::new()
            .with_remove(count_key())
            .with_remove(time_key());

        let sut = ContactRateLimitServiceImpl {
            hash: hash(),
            storage,
        };

        // Act
        let result = sut.reset(*CLIENT).await;

        // Assert
        result.unwrap();
    }
}
