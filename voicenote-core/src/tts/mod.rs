pub mod error;
pub mod mock;
pub mod provider;
pub mod rime;
pub mod types;

pub use error::SynthesisFailure;
pub use provider::TextToSpeech;
pub use types::{AudioData, SynthesisRequest};
