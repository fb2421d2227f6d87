use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::Upload;

/// Exclusive handle on a file sitting in the staging store.
///
/// The file is removed by [`StagedUpload::release`]. If the handle is dropped
/// without being released (the request future was cancelled, or a caller
/// bailed out early), removal is scheduled on the current tokio runtime.
pub struct StagedUpload {
    upload: Upload,
    store: Arc<dyn StagingStore>,
    received_at: Instant,
    released: bool,
}

impl StagedUpload {
    pub fn new(upload: Upload, store: Arc<dyn StagingStore>, received_at: Instant) -> Self {
        Self {
            upload,
            store,
            received_at,
            released: false,
        }
    }

    pub fn upload(&self) -> &Upload {
        &self.upload
    }

    pub fn received_at(&self) -> Instant {
        self.received_at
    }

    pub async fn release(mut self) -> Result<(), StagingStoreError> {
        let result = self.store.delete(&self.upload.path).await;
        self.released = true;

        match &result {
            Ok(()) => tracing::debug!(path = %self.upload.path, "Staged upload removed"),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.upload.path, "Failed to remove staged upload")
            }
        }

        result
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let store = Arc::clone(&self.store);
        let path = self.upload.path.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::debug!(path = %path, "Staged upload dropped unreleased, scheduling removal");
                handle.spawn(async move {
                    if let Err(e) = store.delete(&path).await {
                        tracing::warn!(error = %e, path = %path, "Deferred removal of staged upload failed");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(path = %path, "No runtime available, staged upload left behind");
            }
        }
    }
}
