mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    LoggingSettings, OpenAiSettings, Overrides, ServerSettings, Settings, TimeoutSettings,
    UploadSettings,
};
