pub mod pcm;
pub mod transcode;

pub use pcm::{silence, PcmBuffer, SAMPLE_RATE};
pub use transcode::Transcoder;
