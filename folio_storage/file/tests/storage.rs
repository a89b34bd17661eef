use std::{path::PathBuf, time::Duration};

use folio_storage_contracts::KeyValueStorage;
use folio_storage_file::FileStorage;
use uuid::Uuid;

#[tokio::test]
async fn set_and_get() {
    let path = temp_path();
    let storage = FileStorage::open(&path).await.unwrap();

    assert_eq!(storage.get("contactSubmitCount").await.unwrap(), None);

    storage.set("contactSubmitCount", "3").await.unwrap();
    storage.set("lastSubmitTime", "1700000000000").await.unwrap();
    storage.set("contactSubmitCount", "4").await.unwrap();

    assert_eq!(
        storage.get("contactSubmitCount").await.unwrap().as_deref(),
        Some("4")
    );
    assert_eq!(
        storage.get("lastSubmitTime").await.unwrap().as_deref(),
        Some("1700000000000")
    );

    cleanup(path);
}

#[tokio::test]
async fn survives_reopen() {
    let path = temp_path();

    let storage = FileStorage::open(&path).await.unwrap();
    storage.set("contactSubmitCount", "2").await.unwrap();
    drop(storage);

    let storage = FileStorage::open(&path).await.unwrap();
    assert_eq!(
        storage.get("contactSubmitCount").await.unwrap().as_deref(),
        Some("2")
    );

    cleanup(path);
}

#[tokio::test]
async fn dropped_write_is_persisted() {
    let path = temp_path();
    let storage = FileStorage::open(&path).await.unwrap();

    let result = tokio::time::timeout(Duration::ZERO, storage.set("key", "value")).await;
    assert!(result.is_err());
    storage.set("other", "value").await.unwrap();

    let storage = FileStorage::open(&path).await.unwrap();
    assert_eq!(storage.get("key").await.unwrap().as_deref(), Some("value"));
    assert_eq!(storage.get("other").await.unwrap().as_deref(), Some("value"));

    cleanup(path);
}

#[tokio::test]
async fn remove() {
    let path = temp_path();
    let storage = FileStorage::open(&path).await.unwrap();

    storage.set("key", "value").await.unwrap();
    storage.remove("key").await.unwrap();
    storage.remove("key").await.unwrap();

    assert_eq!(storage.get("key").await.unwrap(), None);

    let storage = FileStorage::open(&path).await.unwrap();
    assert_eq!(storage.get("key").await.unwrap(), None);

    cleanup(path);
}

#[tokio::test]
async fn ping() {
    let path = temp_path();
    let storage = FileStorage::open(&path).await.unwrap();

    storage.ping().await.unwrap();

    cleanup(path);
}

#[tokio::test]
async fn corrupt_file() {
    let path = temp_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    let result = FileStorage::open(&path).await;

    assert!(result.is_err());

    cleanup(path);
}

fn temp_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("folio-storage-{}", Uuid::new_v4()))
        .join("state.json")
}

fn cleanup(path: PathBuf) {
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
