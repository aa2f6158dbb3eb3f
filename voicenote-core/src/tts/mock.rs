use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::error::SynthesisFailure;
use super::provider::TextToSpeech;
use super::types::{AudioData, SynthesisRequest};
use crate::audio::pcm::{CHANNELS, SAMPLE_RATE};

/// Mock behavior for the mock provider
#[derive(Debug, Clone, Default)]
pub enum MockBehavior {
    /// Return audio for every call
    #[default]
    Success,
    /// Fail the call with this zero-based index, succeed on all others
    FailOnCall(usize),
}

/// In-process provider that never touches the network. Every call is
/// recorded, and the returned PCM is derived from the request text so tests
/// can tell units apart in assembled audio.
#[derive(Clone, Default)]
pub struct MockTts {
    behavior: MockBehavior,
    calls: Arc<Mutex<Vec<SynthesisRequest>>>,
}

impl MockTts {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// PCM the mock returns for `text`: each byte doubled, so length is even
    /// and no sample is silent.
    pub fn pcm_for(text: &str) -> Vec<u8> {
        text.bytes().flat_map(|b| [b, b]).collect()
    }

    pub fn calls(&self) -> Vec<SynthesisRequest> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl TextToSpeech for MockTts {
    fn name(&self) -> &'static str {
        "Mock"
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioData, SynthesisFailure> {
        let call_index = {
            let mut calls = self
                .calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            calls.push(request.clone());
            calls.len() - 1
        };

        if let MockBehavior::FailOnCall(fail_at) = self.behavior {
            if fail_at == call_index {
                return Err(SynthesisFailure::Status {
                    status: 500,
                    body: "mock failure".to_string(),
                });
            }
        }

        Ok(AudioData {
            pcm_data: Self::pcm_for(&request.text),
            sample_rate: SAMPLE_RATE,
            channels: CHANNELS,
        })
    }
}
