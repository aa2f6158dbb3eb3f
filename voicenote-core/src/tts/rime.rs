//! Rime text-to-speech implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::error::SynthesisFailure;
use super::provider::TextToSpeech;
use super::types::{AudioData, SynthesisRequest};
use crate::audio::pcm::{CHANNELS, SAMPLE_RATE};

pub const DEFAULT_ENDPOINT: &str = "https://users.rime.ai/v1/rime-tts";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct RimeConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl RimeConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct RimeTts {
    config: RimeConfig,
    client: Client,
}

impl RimeTts {
    pub fn new(config: RimeConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RimeRequest<'a> {
    text: &'a str,
    speaker: &'a str,
    model_id: &'a str,
    sampling_rate: u32,
    speed_alpha: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<&'a str>,
}

impl<'a> From<&'a SynthesisRequest> for RimeRequest<'a> {
    fn from(request: &'a SynthesisRequest) -> Self {
        Self {
            text: &request.text,
            speaker: &request.voice,
            model_id: &request.model,
            sampling_rate: SAMPLE_RATE,
            speed_alpha: request.speed,
            lang: request.lang.as_deref(),
        }
    }
}

fn is_non_audio(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence.starts_with("text/") || essence == "application/json" || essence.ends_with("+json")
}

#[async_trait]
impl TextToSpeech for RimeTts {
    fn name(&self) -> &'static str {
        "Rime"
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioData, SynthesisFailure> {
        let body = RimeRequest::from(request);

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .header(ACCEPT, "audio/pcm")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisFailure::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if is_non_audio(content_type) {
                return Err(SynthesisFailure::NonAudio {
                    content_type: content_type.to_string(),
                });
            }
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(SynthesisFailure::EmptyBody);
        }

        debug!(
            voice = %request.voice,
            bytes = bytes.len(),
            "Received PCM from Rime"
        );

        Ok(AudioData {
            pcm_data: bytes.to_vec(),
            sample_rate: SAMPLE_RATE,
            channels: CHANNELS,
        })
    }
}
