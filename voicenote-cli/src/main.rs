use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use voicenote_core::{GapPolicy, Settings, SettingsManager, VoiceNoteJob};

mod mode;

use crate::mode::ModeArgs;

#[derive(Parser, Debug)]
#[command(name = "voicenote")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turn text into an Ogg Opus voice note with Rime text-to-speech")]
struct Args {
    /// Path to a text file, or - to read from stdin (document mode)
    #[arg(value_name = "DOCUMENT", conflicts_with_all = ["text", "segments"])]
    document: Option<String>,

    /// Inline text to speak (single-voice mode)
    #[arg(long, conflicts_with = "segments")]
    text: Option<String>,

    /// Multi-voice JSON: [{"voice":"atrium","text":"..."},...]
    #[arg(long, value_name = "JSON")]
    segments: Option<String>,

    /// Rime voice ID
    #[arg(long)]
    voice: Option<String>,

    /// Speed multiplier (1.0 = normal)
    #[arg(long)]
    speed: Option<f64>,

    /// Language code (e.g. eng, fra, spa)
    #[arg(long)]
    lang: Option<String>,

    /// Silence between chunks/segments in seconds
    #[arg(long, value_name = "SECONDS")]
    pause: Option<f64>,

    /// Rime model ID
    #[arg(long)]
    model: Option<String>,

    /// Maximum characters per API call in document mode
    #[arg(long, value_name = "CHARS")]
    chunk_size: Option<usize>,

    /// Gap placement around blank segments (original-index, between-units)
    #[arg(long, value_name = "POLICY")]
    gap_policy: Option<GapPolicy>,

    /// Load settings from a specific file instead of ~/.voicenote/settings.toml
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
}

impl Args {
    fn mode_args(&self) -> ModeArgs {
        ModeArgs {
            document: self.document.clone(),
            text: self.text.clone(),
            segments: self.segments.clone(),
        }
    }

    /// Flags win over the settings file for this run only
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(voice) = &self.voice {
            settings.voice = voice.clone();
        }
        if let Some(speed) = self.speed {
            settings.speed = speed;
        }
        if let Some(lang) = &self.lang {
            settings.lang = Some(lang.clone());
        }
        if let Some(pause) = self.pause {
            settings.pause_seconds = pause;
        }
        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
        if let Some(chunk_size) = self.chunk_size {
            settings.chunk_size = chunk_size;
        }
        if let Some(gap_policy) = self.gap_policy {
            settings.gap_policy = gap_policy;
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
        .and_then(|runtime| runtime.block_on(async_main(args)));

    match result {
        Ok(output) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Run failed: {e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn async_main(args: Args) -> Result<PathBuf> {
    let mode_args = args.mode_args();
    mode_args.ensure_present()?;

    let settings_path = match &args.settings {
        Some(path) => path.clone(),
        None => SettingsManager::default_settings_path()?,
    };

    // Nothing is written under HOME until the credential check has passed
    let mut settings = SettingsManager::load(&settings_path)?;
    args.apply_overrides(&mut settings);
    let job = VoiceNoteJob::from_settings(&settings)?;

    if let Err(e) = setup_tracing() {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    let manager = SettingsManager::from_path(settings_path)?;

    info!(
        "CLI startup: voice={}, model={}, speed={}, lang={:?}, pause={}, settings={:?}",
        settings.voice,
        settings.model,
        settings.speed,
        settings.lang,
        settings.pause_seconds,
        manager.path()
    );

    let mode = mode_args.into_mode()?;

    Ok(job.run(&mode).await?)
}

fn setup_tracing() -> Result<()> {
    use std::fs;
    use tracing_subscriber::fmt;

    // Logs go to a file so stdout carries only the output path
    let home = dirs::home_dir().context("Failed to get home directory")?;
    let trace_dir = home.join(".voicenote").join("trace");
    fs::create_dir_all(&trace_dir)?;

    let log_file = trace_dir.join("voicenote.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()?;

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}
