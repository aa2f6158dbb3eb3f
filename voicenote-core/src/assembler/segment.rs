use serde::{Deserialize, Serialize};

use crate::error::{Result, VoiceNoteError};
use crate::tts::SynthesisRequest;

/// Settings applied to any unit that does not carry its own
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceDefaults {
    pub voice: String,
    pub model: String,
    pub speed: f64,
    pub lang: Option<String>,
}

impl VoiceDefaults {
    pub fn request(&self, text: impl Into<String>) -> SynthesisRequest {
        SynthesisRequest {
            text: text.into(),
            voice: self.voice.clone(),
            model: self.model.clone(),
            speed: self.speed,
            lang: self.lang.clone(),
        }
    }
}

/// One entry of a multi-voice segment list, e.g.
/// `{"voice": "atrium", "text": "Hello", "speed": 1.1}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub model: Option<String>,
}

impl Segment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Fill absent fields from `defaults`. Returns `None` for blank segments,
    /// which are skipped rather than sent.
    pub fn resolve(&self, defaults: &VoiceDefaults) -> Option<SynthesisRequest> {
        if self.is_blank() {
            return None;
        }

        Some(SynthesisRequest {
            text: self.text.clone(),
            voice: self.voice.clone().unwrap_or_else(|| defaults.voice.clone()),
            model: self.model.clone().unwrap_or_else(|| defaults.model.clone()),
            speed: self.speed.unwrap_or(defaults.speed),
            lang: self.lang.clone().or_else(|| defaults.lang.clone()),
        })
    }
}

/// Parse a JSON array of segments
pub fn parse_segments(json: &str) -> Result<Vec<Segment>> {
    serde_json::from_str(json)
        .map_err(|e| VoiceNoteError::input(format!("failed to parse segments JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> VoiceDefaults {
        VoiceDefaults {
            voice: "atrium".to_string(),
            model: "arcana".to_string(),
            speed: 1.0,
            lang: Some("eng".to_string()),
        }
    }

    #[test]
    fn test_parse_minimal_segments() {
        let segments = parse_segments(r#"[{"text":"Hi","voice":"a"},{"text":""}]"#).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].voice.as_deref(), Some("a"));
        assert!(segments[1].is_blank());
    }

    #[test]
    fn test_parse_accepts_integer_speed() {
        let segments = parse_segments(r#"[{"text":"Hi","speed":2}]"#).unwrap();
        assert_eq!(segments[0].speed, Some(2.0));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_segments(r#"[{"text": "Hi""#).unwrap_err();
        assert!(matches!(err, VoiceNoteError::Input(_)));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_segments(r#"{"text": "Hi"}"#).unwrap_err();
        assert!(matches!(err, VoiceNoteError::Input(_)));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let request = Segment::new("Hello").resolve(&defaults()).unwrap();
        assert_eq!(request, defaults().request("Hello"));
    }

    #[test]
    fn test_segment_fields_override_defaults() {
        let segment = Segment {
            text: "Hola".to_string(),
            voice: Some("luna".to_string()),
            lang: Some("spa".to_string()),
            speed: Some(1.3),
            model: Some("mist".to_string()),
        };
        let request = segment.resolve(&defaults()).unwrap();
        assert_eq!(request.voice, "luna");
        assert_eq!(request.lang.as_deref(), Some("spa"));
        assert_eq!(request.speed, 1.3);
        assert_eq!(request.model, "mist");
    }

    #[test]
    fn test_blank_segment_resolves_to_none() {
        assert!(Segment::new("").resolve(&defaults()).is_none());
        assert!(Segment::new("  \n").resolve(&defaults()).is_none());
    }
}
