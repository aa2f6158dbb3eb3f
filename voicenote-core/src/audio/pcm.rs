//! Raw PCM: 16-bit signed little-endian mono at 48 kHz, no header or framing.

/// Sample rate requested from the synthesis endpoint and fed to the encoder
pub const SAMPLE_RATE: u32 = 48_000;
pub const CHANNELS: u16 = 1;
pub const BYTES_PER_SAMPLE: usize = 2;

/// Silent PCM lasting `seconds`. Fractional sample counts truncate toward
/// zero; negative or non-finite durations yield an empty buffer.
pub fn silence(seconds: f64) -> Vec<u8> {
    let samples = (SAMPLE_RATE as f64 * seconds).floor();
    let samples = if samples.is_finite() && samples > 0.0 {
        samples as usize
    } else {
        0
    };
    vec![0u8; samples * BYTES_PER_SAMPLE]
}

/// Accumulates PCM fragments in order. Concatenation is a plain byte append.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    bytes: Vec<u8>,
}

impl PcmBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, pcm: &[u8]) {
        self.bytes.extend_from_slice(pcm);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        (self.bytes.len() / BYTES_PER_SAMPLE) as f64 / SAMPLE_RATE as f64
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
