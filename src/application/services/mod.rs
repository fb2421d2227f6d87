mod analysis_service;
mod extraction_prompt;
mod staged_upload;
mod task_extractor;

pub use analysis_service::{
    AnalysisError, AnalysisReport, AnalysisService, AnalysisTimeouts, Stage,
};
pub use extraction_prompt::{SYSTEM_PROMPT, TASK_LIST_SCHEMA_NAME, task_list_schema};
pub use staged_upload::StagedUpload;
pub use task_extractor::{ExtractionError, TaskExtractor, build_user_message, parse_completion};
