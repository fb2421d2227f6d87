use std::sync::Arc;

use crate::application::ports::{LlmClient, TranscriptionEngine};
use crate::application::services::AnalysisService;
use crate::presentation::config::UploadSettings;

/// Request-size knobs applied at the HTTP edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// `None` lifts axum's default body cap entirely.
    pub max_body_bytes: Option<usize>,
    pub max_catalog_bytes: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_body_bytes: None,
            max_catalog_bytes: 256 * 1024,
        }
    }
}

impl From<&UploadSettings> for UploadLimits {
    fn from(settings: &UploadSettings) -> Self {
        Self {
            max_body_bytes: settings.max_body_bytes,
            max_catalog_bytes: settings.max_catalog_bytes,
        }
    }
}

pub struct AppState<T: ?Sized, L: ?Sized>
where
    T: TranscriptionEngine,
    L: LlmClient,
{
    pub analysis_service: Arc<AnalysisService<T, L>>,
    pub upload_limits: UploadLimits,
}

impl<T: ?Sized, L: ?Sized> Clone for AppState<T, L>
where
    T: TranscriptionEngine,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            upload_limits: self.upload_limits,
        }
    }
}
