use anyhow::Context;
use folio_config::StorageConfig;
use folio_storage_file::FileStorage;

/// Open the key-value storage file
pub async fn open(config: &StorageConfig) -> anyhow::Result<FileStorage> {
    FileStorage::open(&config.path)
        .await
        .context("Failed to open storage")
}
