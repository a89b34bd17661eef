use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use folio_storage_contracts::KeyValueStorage;
use folio_utils::trace_instrument;
use tokio::sync::Mutex;
use tracing::{debug, Instrument};

/// [`KeyValueStorage`] backed by a single JSON object on disk.
///
/// All entries are kept in memory. Every write replaces the file by writing a
/// temporary sibling and renaming it over the original.
#[derive(Debug, Clone)]
pub struct FileStorage {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the storage file at `path`, creating parent directories as needed.
    /// A missing file is treated as empty storage.
    pub async fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create storage directory {}", parent.display())
            })?;
        }

        let entries = match tokio::fs::read(&path).await {
            Ok(data) => serde_json::from_slice(&data)
                .with_context(|| format!("Failed to parse storage file {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "storage file does not exist yet");
                BTreeMap::new()
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read storage file {}", path.display()))
            }
        };

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                entries: Mutex::new(entries),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl Inner {
    async fn set(&self, key: String, value: String) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().await;
        let previous = entries.insert(key.clone(), value);

        if let Err(err) = self.persist(&entries).await {
            match previous {
                Some(previous) => entries.insert(key, previous),
                None => entries.remove(&key),
            };
            return Err(err);
        }

        Ok(())
    }

    async fn remove(&self, key: String) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().await;
        let Some(previous) = entries.remove(&key) else {
            return Ok(());
        };

        if let Err(err) = self.persist(&entries).await {
            entries.insert(key, previous);
            return Err(err);
        }

        Ok(())
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> anyhow::Result<()> {
        let data = serde_json::to_vec_pretty(entries).context("Failed to serialize storage")?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, data)
            .await
            .with_context(|| format!("Failed to write storage file {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| {
                format!(
                    "Failed to move storage file into place at {}",
                    self.path.display()
                )
            })
    }
}

impl KeyValueStorage for FileStorage {
    #[trace_instrument(skip(self))]
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.inner.entries.lock().await.get(key).cloned())
    }

    /// The write runs on a separate task and completes even if the returned
    /// future is dropped.
    #[trace_instrument(skip(self))]
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let inner = Arc::clone(&self.inner);
        let (key, value) = (key.to_owned(), value.to_owned());
        tokio::spawn(async move { inner.set(key, value).await }.in_current_span())
            .await
            .context("Storage write task failed")?
    }

    #[trace_instrument(skip(self))]
    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let inner = Arc::clone(&self.inner);
        let key = key.to_owned();
        tokio::spawn(async move { inner.remove(key).await }.in_current_span())
            .await
            .context("Storage write task failed")?
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let dir = match self.inner.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let metadata = tokio::fs::metadata(dir)
            .await
            .with_context(|| format!("Failed to access storage directory {}", dir.display()))?;
        anyhow::ensure!(
            !metadata.permissions().readonly(),
            "Storage directory {} is read-only",
            dir.display()
        );

        Ok(())
    }
}
