use std::error::Error;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

/// Container-level facts about a source file, enough for a pre-flight
/// summary. Stream-level probing is the engine's business.
#[derive(Clone, Debug)]
pub struct ProbeMetadata {
    pub duration: Option<Duration>,
    pub size: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug)]
struct FFProbeJsonOutput {
    pub format: FFProbeJsonFormat,
}

#[derive(Serialize, Deserialize, Debug)]
struct FFProbeJsonFormat {
    pub duration: Option<String>,
    pub size: Option<String>,
}

pub fn probe_file(path: &PathBuf) -> Result<ProbeMetadata, Box<dyn Error>> {
    let output = Command::new("ffprobe")
        .args([
            &PathBuf::from("-of"),
            &PathBuf::from("json"),
            &PathBuf::from("-show_format"),
            path,
        ])
        .output()?;
    if output.status.success() {
        let utf8 = String::from_utf8(output.stdout)?;
        let deserialized = serde_json::from_str::<FFProbeJsonOutput>(&utf8)?;
        Ok(ProbeMetadata {
            duration: parse_duration(&deserialized.format.duration),
            size: match &deserialized.format.size {
                None => None,
                Some(s) => s.parse().ok(),
            },
        })
    } else {
        Err(Box::new(ProbeError::for_file(path, "ffprobe did not exit successfully.")))
    }
}

fn parse_duration(field: &Option<String>) -> Option<Duration> {
    match field {
        None => None,
        Some(s) => match s.parse::<f64>() {
            Ok(secs) if secs.is_finite() && secs >= 0.0 => Some(Duration::from_secs_f64(secs)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration(&Some(String::from("90.5"))), Some(Duration::from_millis(90500)));
        assert_eq!(parse_duration(&Some(String::from("N/A"))), None);
        assert_eq!(parse_duration(&Some(String::from("-1"))), None);
        assert_eq!(parse_duration(&Some(String::from("inf"))), None);
        assert_eq!(parse_duration(&Some(String::from("NaN"))), None);
        assert_eq!(parse_duration(&None), None);
    }

    #[test]
    fn test_deserialize_format_block() {
        let json = r#"{"format": {"filename": "clip.mov", "duration": "12.480000", "size": "1048576"}}"#;
        let deserialized = serde_json::from_str::<FFProbeJsonOutput>(json).unwrap();
        assert_eq!(deserialized.format.duration.as_deref(), Some("12.480000"));
        assert_eq!(deserialized.format.size.as_deref(), Some("1048576"));
    }
}
