mod mock_transcription_engine;
mod openai_whisper_engine;

pub use mock_transcription_engine::MockTranscriptionEngine;
pub use openai_whisper_engine::{DEFAULT_OPENAI_BASE_URL, DEFAULT_WHISPER_MODEL, OpenAiWhisperEngine};
