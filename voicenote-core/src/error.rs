use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::tts::error::SynthesisFailure;

/// Which kind of unit a synthesis call was made for. Used only to word
/// diagnostics the way users expect ("chunk 3", "segment 1").
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum UnitKind {
    Text,
    Chunk,
    Segment,
}

#[derive(Error, Debug)]
pub enum VoiceNoteError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Synthesis failed on {kind} {index} (voice={voice}): {reason}")]
    Synthesis {
        kind: UnitKind,
        index: usize,
        voice: String,
        reason: SynthesisFailure,
    },

    /// `stderr` holds everything the encoder printed; the message carries
    /// only its last non-empty line.
    #[error("Encoder exited with {status}: {}", last_line(.stderr))]
    Transcode {
        status: ExitStatus,
        stderr: String,
        scratch: PathBuf,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VoiceNoteError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }
}

pub type Result<T> = std::result::Result<T, VoiceNoteError>;

fn last_line(text: &str) -> &str {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("no diagnostic output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn failed_status() -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(1 << 8)
    }

    #[cfg(unix)]
    #[test]
    fn test_transcode_message_is_one_line() {
        let err = VoiceNoteError::Transcode {
            status: failed_status(),
            stderr: "Input #0, s16le, from 'audio.pcm':\n  Duration: N/A\nConversion failed!\n"
                .to_string(),
            scratch: PathBuf::from("audio.pcm"),
        };

        let message = err.to_string();
        assert_eq!(message.lines().count(), 1, "{message}");
        assert!(message.ends_with(": Conversion failed!"), "{message}");
    }

    #[cfg(unix)]
    #[test]
    fn test_transcode_message_without_stderr() {
        let err = VoiceNoteError::Transcode {
            status: failed_status(),
            stderr: String::new(),
            scratch: PathBuf::from("audio.pcm"),
        };

        assert!(err.to_string().ends_with(": no diagnostic output"));
    }

    #[test]
    fn test_synthesis_message_names_unit_and_voice() {
        let err = VoiceNoteError::Synthesis {
            kind: UnitKind::Chunk,
            index: 3,
            voice: "luna".to_string(),
            reason: SynthesisFailure::EmptyBody,
        };

        assert!(err.to_string().starts_with("Synthesis failed on chunk 3 (voice=luna): "));
    }
}
