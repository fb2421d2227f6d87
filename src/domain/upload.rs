use super::storage_path::StoragePath;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Metadata of an uploaded file once it has been written to staging.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub path: StoragePath,
    pub original_filename: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl Upload {
    pub fn new(
        path: StoragePath,
        original_filename: String,
        content_type: Option<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            path,
            original_filename,
            content_type: content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            size_bytes,
        }
    }
}
