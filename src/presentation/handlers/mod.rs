mod health;
mod transcribe;

pub use health::{HealthResponse, health_handler};
pub use transcribe::{
    AUDIO_FIELD, CATALOG_FIELD, ErrorResponse, FailureResponse, NO_AUDIO_MESSAGE,
    TranscribeResponse, transcribe_handler,
};
