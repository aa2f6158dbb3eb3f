//! PCM → Ogg Opus via an external encoder process.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use super::pcm::SAMPLE_RATE;
use crate::error::{Result, VoiceNoteError};

pub const DEFAULT_ENCODER: &str = "ffmpeg";
pub const SCRATCH_FILE_NAME: &str = "audio.pcm";

/// Runs the encoder once per output file. Encoding parameters are fixed:
/// s16le mono 48 kHz in, libopus 64 kbps VBR tuned for voice out.
#[derive(Debug, Clone)]
pub struct Transcoder {
    program: String,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new(DEFAULT_ENCODER)
    }
}

impl Transcoder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn encoder_args(input: &Path, output: &Path) -> Vec<OsString> {
        let sample_rate = SAMPLE_RATE.to_string();
        let mut args: Vec<OsString> = [
            "-y",
            "-f",
            "s16le",
            "-ar",
            sample_rate.as_str(),
            "-ac",
            "1",
            "-i",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        args.push(input.as_os_str().to_owned());
        args.extend(
            [
                "-c:a",
                "libopus",
                "-b:a",
                "64k",
                "-vbr",
                "on",
                "-application",
                "voip",
            ]
            .iter()
            .map(OsString::from),
        );
        args.push(output.as_os_str().to_owned());
        args
    }

    /// Path of the scratch PCM file written next to `destination`
    pub fn scratch_path(destination: &Path) -> Result<PathBuf> {
        let dir = destination.parent().ok_or_else(|| {
            VoiceNoteError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("output path has no parent directory: {destination:?}"),
            ))
        })?;
        Ok(dir.join(SCRATCH_FILE_NAME))
    }

    /// Encode `pcm` into `destination`. The scratch file is removed only when
    /// the encoder succeeds; on failure it is left in place for inspection.
    pub async fn encode(&self, pcm: &[u8], destination: &Path) -> Result<()> {
        let scratch = Self::scratch_path(destination)?;
        tokio::fs::write(&scratch, pcm).await?;

        info!(
            program = %self.program,
            bytes = pcm.len(),
            "Encoding {:?} -> {:?}",
            scratch,
            destination
        );

        let output = Command::new(&self.program)
            .args(Self::encoder_args(&scratch, destination))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(status = %output.status, "Encoder failed, keeping {:?}", scratch);
            return Err(VoiceNoteError::Transcode {
                status: output.status,
                stderr,
                scratch,
            });
        }

        debug!("Encoder finished: {}", output.status);
        if let Err(e) = tokio::fs::remove_file(&scratch).await {
            warn!("Failed to remove scratch file {:?}: {e}", scratch);
        }

        Ok(())
    }
}
