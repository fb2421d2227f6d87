use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::AnalysisTimeouts;
use crate::infrastructure::audio::{DEFAULT_OPENAI_BASE_URL, DEFAULT_WHISPER_MODEL};
use crate::infrastructure::llm::DEFAULT_CHAT_MODEL;
use crate::infrastructure::observability::TracingConfig;

use super::Environment;

const DEFAULT_MAX_CATALOG_BYTES: i64 = 256 * 1024;
const DEFAULT_TIMEOUT_SECS: i64 = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub openai: OpenAiSettings,
    pub uploads: UploadSettings,
    pub timeouts: TimeoutSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub transcription_model: String,
    pub chat_model: String,
    pub max_tokens: usize,
}

impl std::fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("transcription_model", &self.transcription_model)
            .field("chat_model", &self.chat_model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub dir: PathBuf,
    #[serde(default)]
    pub max_body_bytes: Option<usize>,
    pub max_catalog_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutSettings {
    pub transcription_secs: u64,
    pub extraction_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

/// Plain environment variables that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<String>,
    pub api_key: Option<String>,
}

impl Overrides {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT").ok(),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
        }
    }
}

impl Settings {
    /// Loads settings from defaults, `appsettings.<environment>`, `APP__*`
    /// variables, then `PORT` / `OPENAI_API_KEY`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_with(environment, Overrides::from_env())
    }

    pub fn load_with(environment: Environment, overrides: Overrides) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("openai.api_key", "")?
            .set_default("openai.base_url", DEFAULT_OPENAI_BASE_URL)?
            .set_default("openai.transcription_model", DEFAULT_WHISPER_MODEL)?
            .set_default("openai.chat_model", DEFAULT_CHAT_MODEL)?
            .set_default("openai.max_tokens", 4096_i64)?
            .set_default("uploads.dir", "uploads")?
            .set_default("uploads.max_catalog_bytes", DEFAULT_MAX_CATALOG_BYTES)?
            .set_default("timeouts.transcription_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("timeouts.extraction_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("logging.level", TracingConfig::default().level)?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", overrides.port)?
            .set_override_option("openai.api_key", overrides.api_key)?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.openai.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "OPENAI_API_KEY (or APP__OPENAI__API_KEY) must be set".to_string(),
            ));
        }
        if self.timeouts.transcription_secs == 0 || self.timeouts.extraction_secs == 0 {
            return Err(ConfigError::Message(
                "timeouts must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn analysis_timeouts(&self) -> AnalysisTimeouts {
        AnalysisTimeouts {
            transcription: Duration::from_secs(self.timeouts.transcription_secs),
            extraction: Duration::from_secs(self.timeouts.extraction_secs),
        }
    }

    pub fn tracing_config(&self, environment: Environment) -> TracingConfig {
        TracingConfig {
            environment: environment.to_string(),
            level: self.logging.level.clone(),
            json_format: self.logging.json,
        }
    }
}
