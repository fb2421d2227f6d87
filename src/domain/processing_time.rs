use std::time::Duration;

use serde::{Serialize, Serializer};

/// Wall-clock time spent in each step of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessingTime {
    #[serde(serialize_with = "as_seconds")]
    pub transcription: Duration,
    #[serde(serialize_with = "as_seconds")]
    pub analysis: Duration,
    #[serde(serialize_with = "as_seconds")]
    pub total: Duration,
}

/// Renders a duration as `"<seconds>s"` with two decimals, e.g. `"3.27s"`.
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}

fn as_seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_seconds(*duration))
}
