use std::io::Read;
use std::path::PathBuf;

use voicenote_core::assembler::parse_segments;
use voicenote_core::{SynthesisMode, VoiceNoteError};

/// Where document text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Stdin,
    File(PathBuf),
}

impl DocumentSource {
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    pub fn read(&self) -> Result<String, VoiceNoteError> {
        match self {
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|e| VoiceNoteError::input(format!("failed to read stdin: {e}")))?;
                Ok(text)
            }
            Self::File(path) => std::fs::read_to_string(path)
                .map_err(|e| VoiceNoteError::input(format!("failed to read {path:?}: {e}"))),
        }
    }
}

/// The mode selectors exactly as given on the command line. At most one is
/// set; clap rejects combinations.
#[derive(Debug, Default, Clone)]
pub struct ModeArgs {
    pub document: Option<String>,
    pub text: Option<String>,
    pub segments: Option<String>,
}

impl ModeArgs {
    /// Fail early, before credentials or any input is read
    pub fn ensure_present(&self) -> Result<(), VoiceNoteError> {
        if self.document.is_none() && self.text.is_none() && self.segments.is_none() {
            return Err(VoiceNoteError::configuration(
                "no input provided: pass a text file, --text, or --segments",
            ));
        }
        Ok(())
    }

    pub fn into_mode(self) -> Result<SynthesisMode, VoiceNoteError> {
        self.ensure_present()?;

        if let Some(json) = self.segments {
            return Ok(SynthesisMode::MultiSegment(parse_segments(&json)?));
        }
        if let Some(document) = self.document {
            let text = DocumentSource::parse(&document).read()?;
            return Ok(SynthesisMode::Document(text));
        }
        match self.text {
            Some(text) => Ok(SynthesisMode::SingleText(text)),
            None => Err(VoiceNoteError::configuration("no input provided")),
        }
    }
}
