use std::future::Future;

/// Durable string key-value storage.
///
/// Writes to a single key are atomic: a concurrent or subsequent reader sees
/// either the old or the new value, never a partial one.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait KeyValueStorage: Send + Sync + 'static {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = anyhow::Result<Option<String>>> + Send;

    /// Creates or replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Removes the value stored under `key`.
    ///
    /// Does nothing if the key does not exist.
    fn remove(&self, key: &str) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Verify that the storage is usable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockKeyValueStorage {
    pub fn with_get(mut self, key: String, result: Option<String>) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_set(mut self, key: String, value: String) -> Self {
        self.expect_set()
            .once()
            .with(mockall::predicate::eq(key), mockall::predicate::eq(value))
            .return_once(|_, _| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_remove(mut self, key: String) -> Self {
        self.expect_remove()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_ping(mut self, ok: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if ok {
                Ok(())
            } else {
                Err(anyhow::anyhow!("storage unavailable"))
            }))
        });
        self
    }
}
