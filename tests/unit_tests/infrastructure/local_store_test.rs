use std::io;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream;

use voice_estimate::application::ports::{StagingStore, StagingStoreError};
use voice_estimate::domain::StoragePath;
use voice_estimate::infrastructure::storage::LocalStagingStore;

fn create_test_store() -> (tempfile::TempDir, LocalStagingStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStagingStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_valid_stream_when_storing_then_file_is_persisted_under_its_name() {
    let (dir, store) = create_test_store();
    let path = StoragePath::for_upload("visite.wav");

    let chunks = vec![Ok(Bytes::from("RIFF")), Ok(Bytes::from("WAVE"))];
    let size = store
        .store(&path, stream::iter(chunks).boxed())
        .await
        .unwrap();

    assert_eq!(size, 8);
    assert!(dir.path().join(path.as_str()).exists());
}

#[tokio::test]
async fn given_stored_file_when_fetching_then_bytes_match_original() {
    let (_dir, store) = create_test_store();
    let path = StoragePath::for_upload("visite.wav");

    let content = b"fake audio payload";
    store
        .store(&path, stream::iter(vec![Ok(Bytes::from(&content[..]))]).boxed())
        .await
        .unwrap();

    let fetched = store.fetch(&path).await.unwrap();
    assert_eq!(&fetched[..], content);
}

#[tokio::test]
async fn given_stored_file_when_deleting_then_file_is_gone() {
    let (dir, store) = create_test_store();
    let path = StoragePath::for_upload("visite.wav");

    store
        .store(&path, stream::iter(vec![Ok(Bytes::from("data"))]).boxed())
        .await
        .unwrap();
    store.delete(&path).await.unwrap();

    assert!(!dir.path().join(path.as_str()).exists());
    assert!(matches!(
        store.fetch(&path).await,
        Err(StagingStoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn given_empty_stream_when_storing_then_empty_file_is_created() {
    let (dir, store) = create_test_store();
    let path = StoragePath::for_upload("silence.wav");

    let size = store
        .store(&path, stream::iter(Vec::<Result<Bytes, io::Error>>::new()).boxed())
        .await
        .unwrap();

    assert_eq!(size, 0);
    assert!(dir.path().join(path.as_str()).exists());
}

#[tokio::test]
async fn given_stream_error_when_storing_then_returns_io_error_and_discards_partial_file() {
    let (dir, store) = create_test_store();
    let path = StoragePath::for_upload("visite.wav");

    let chunks: Vec<Result<Bytes, io::Error>> = vec![
        Ok(Bytes::from("partial")),
        Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "network drop",
        )),
    ];

    let result = store.store(&path, stream::iter(chunks).boxed()).await;
    assert!(matches!(result, Err(StagingStoreError::Io(_))));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn given_missing_directory_when_creating_store_then_directory_is_created() {
    let dir = tempfile::TempDir::new().unwrap();
    let nested = dir.path().join("uploads").join("audio");

    let store = LocalStagingStore::new(nested.clone()).unwrap();

    assert!(nested.is_dir());
    assert_eq!(store.base_path(), nested.as_path());
}
