use std::time::Duration;

use voice_estimate::domain::{ProcessingTime, format_seconds};

#[test]
fn given_duration_when_formatting_then_renders_seconds_with_two_decimals() {
    assert_eq!(format_seconds(Duration::from_millis(3271)), "3.27s");
    assert_eq!(format_seconds(Duration::ZERO), "0.00s");
}

#[test]
fn given_processing_time_when_serialized_then_each_step_is_a_seconds_string() {
    let timings = ProcessingTime {
        transcription: Duration::from_millis(1500),
        analysis: Duration::from_millis(2250),
        total: Duration::from_millis(3800),
    };

    let json = serde_json::to_value(timings).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "transcription": "1.50s",
            "analysis": "2.25s",
            "total": "3.80s"
        })
    );
}
