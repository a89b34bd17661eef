use std::{
    collections::HashMap,
    net::IpAddr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::sync::OwnedMutexGuard;

/// Serializes submissions per client.
///
/// Entries are removed once no task holds or waits for the lock of a client.
#[derive(Debug, Default)]
pub struct ClientLocks {
    locks: Mutex<HashMap<IpAddr, Arc<tokio::sync::Mutex<()>>>>,
}

pub struct ClientLockGuard<'a> {
    locks: &'a ClientLocks,
    client: IpAddr,
    guard: Option<OwnedMutexGuard<()>>,
}

impl ClientLocks {
    pub async fn lock(&self, client: IpAddr) -> ClientLockGuard<'_> {
        let lock = Arc::clone(self.map().entry(client).or_default());
        let guard = lock.lock_owned().await;
        ClientLockGuard {
            locks: self,
            client,
            guard: Some(guard),
        }
    }

    fn map(&self) -> MutexGuard<'_, HashMap<IpAddr, Arc<tokio::sync::Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.map().len()
    }
}

impl Drop for ClientLockGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut map = self.locks.map();
        if map
            .get(&self.client)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            map.remove(&self.client);
        }
    }
}
