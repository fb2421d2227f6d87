use bytes::Bytes;

use super::upload::Upload;

/// Audio bytes read back from staging, with what a speech-to-text API
/// needs to detect the format.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl AudioClip {
    pub fn from_upload(upload: &Upload, data: Bytes) -> Self {
        Self {
            filename: upload.original_filename.clone(),
            content_type: upload.content_type.clone(),
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
