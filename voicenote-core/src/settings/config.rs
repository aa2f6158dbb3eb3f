use serde::{Deserialize, Serialize};

use crate::assembler::{AssemblyOptions, GapPolicy, VoiceDefaults};
use crate::audio::transcode::DEFAULT_ENCODER;
use crate::text::DEFAULT_CHUNK_SIZE;
use crate::tts::rime::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

/// Synthesis endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout; a request that exceeds it fails the run
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding the bearer token
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderSettings {
    /// Encoder executable, looked up on PATH unless absolute
    #[serde(default = "default_encoder_program")]
    pub program: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            program: default_encoder_program(),
        }
    }
}

/// Defaults applied to every invocation. Command line flags override these
/// for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Voice used when a unit does not name one
    #[serde(default = "default_voice")]
    pub voice: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Speed multiplier, 1.0 is normal
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Language code such as `eng`, `fra` or `spa`
    #[serde(default)]
    pub lang: Option<String>,

    /// Silence between chunks or segments
    #[serde(default = "default_pause_seconds")]
    pub pause_seconds: f64,

    /// Character budget per request in document mode
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default)]
    pub gap_policy: GapPolicy,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub encoder: EncoderSettings,
}

fn default_voice() -> String {
    "atrium".to_string()
}

fn default_model() -> String {
    "arcana".to_string()
}

fn default_speed() -> f64 {
    1.0
}

fn default_pause_seconds() -> f64 {
    0.3
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_api_key_env() -> String {
    "RIME_API_KEY".to_string()
}

fn default_encoder_program() -> String {
    DEFAULT_ENCODER.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            model: default_model(),
            speed: default_speed(),
            lang: None,
            pause_seconds: default_pause_seconds(),
            chunk_size: default_chunk_size(),
            gap_policy: GapPolicy::default(),
            api: ApiSettings::default(),
            encoder: EncoderSettings::default(),
        }
    }
}

impl Settings {
    pub fn voice_defaults(&self) -> VoiceDefaults {
        VoiceDefaults {
            voice: self.voice.clone(),
            model: self.model.clone(),
            speed: self.speed,
            lang: self.lang.clone(),
        }
    }

    pub fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions {
            defaults: self.voice_defaults(),
            pause_seconds: self.pause_seconds,
            chunk_size: self.chunk_size,
            gap_policy: self.gap_policy,
        }
    }
}
