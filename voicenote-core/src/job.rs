//! One end-to-end invocation: synthesize, assemble, encode, hand back a path.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::assembler::{AudioAssembler, SynthesisMode};
use crate::audio::Transcoder;
use crate::error::{Result, VoiceNoteError};
use crate::settings::{api_key_from_env, Settings};
use crate::tts::rime::{RimeConfig, RimeTts};
use crate::tts::TextToSpeech;

pub const OUTPUT_DIR_PREFIX: &str = "voicenote_";
pub const OUTPUT_FILE_NAME: &str = "output.ogg";

pub struct VoiceNoteJob {
    assembler: AudioAssembler,
    transcoder: Transcoder,
    output_root: PathBuf,
}

impl VoiceNoteJob {
    /// Build a job against the Rime endpoint. Fails with a configuration
    /// error when the API key is absent, before anything else happens.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = api_key_from_env(&settings.api.api_key_env)?;

        let config = RimeConfig::new(api_key)
            .with_endpoint(settings.api.endpoint.clone())
            .with_timeout(Duration::from_secs(settings.api.timeout_secs));
        let tts = RimeTts::new(config).map_err(|e| {
            VoiceNoteError::configuration(format!("failed to create HTTP client: {e}"))
        })?;

        Ok(Self::with_provider(settings, Arc::new(tts)))
    }

    pub fn with_provider(settings: &Settings, tts: Arc<dyn TextToSpeech>) -> Self {
        Self {
            assembler: AudioAssembler::new(tts, settings.assembly_options()),
            transcoder: Transcoder::new(settings.encoder.program.clone()),
            output_root: std::env::temp_dir(),
        }
    }

    /// Directory under which the per-run output directory is created
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Run the whole pipeline and return the absolute path of the encoded
    /// file. The output directory is left in place for the caller.
    pub async fn run(&self, mode: &SynthesisMode) -> Result<PathBuf> {
        let assembly = self.assembler.assemble(mode).await?;

        let dir = tempfile::Builder::new()
            .prefix(OUTPUT_DIR_PREFIX)
            .tempdir_in(&self.output_root)?
            .keep();
        let output = dir.join(OUTPUT_FILE_NAME);

        self.transcoder
            .encode(assembly.pcm.as_bytes(), &output)
            .await?;

        let output = tokio::fs::canonicalize(&output).await?;
        info!("Voice note written to {:?}", output);
        Ok(output)
    }
}
