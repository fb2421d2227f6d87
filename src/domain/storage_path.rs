use std::fmt;
use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 10;

/// Location of a staged upload, relative to the uploads directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    /// Generates a unique name of the form `<unix-millis>-<random><.ext>`,
    /// keeping the extension of `original_filename` when it looks sane.
    pub fn for_upload(original_filename: &str) -> Self {
        let stem = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        );

        match extension_of(original_filename) {
            Some(ext) => Self(format!("{}.{}", stem, ext)),
            None => Self(stem),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.0).extension().and_then(|e| e.to_str())
    }
}

fn extension_of(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
