use async_trait::async_trait;

use super::error::SynthesisFailure;
use super::types::{AudioData, SynthesisRequest};

/// Trait for text-to-speech providers
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Human readable provider name for logs
    fn name(&self) -> &'static str;

    /// Synthesize one text fragment to 16-bit mono PCM. A single attempt is
    /// made; callers decide what a failure means for the rest of the run.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioData, SynthesisFailure>;
}
