mod audio_clip;
mod catalog;
mod processing_time;
mod storage_path;
mod task_record;
mod upload;

pub use audio_clip::AudioClip;
pub use catalog::{Catalog, CatalogError};
pub use processing_time::{ProcessingTime, format_seconds};
pub use storage_path::StoragePath;
pub use task_record::{
    CatalogMatch, ExtractionResult, MISSING_CATALOG_ID, MISSING_QUANTITY, MISSING_ROOM, Quantity,
    TaskRecord,
};
pub use upload::{DEFAULT_CONTENT_TYPE, Upload};
