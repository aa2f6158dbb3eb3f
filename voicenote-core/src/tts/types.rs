use serde::{Deserialize, Serialize};

/// Raw audio returned from a synthesis call
#[derive(Debug, Clone)]
pub struct AudioData {
    pub pcm_data: Vec<u8>,
    pub sample_rate: u32,
    pub channels: u16,
}

/// One fully resolved synthesis call: every default has already been applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    pub model: String,
    pub speed: f64,
    #[serde(default)]
    pub lang: Option<String>,
}
