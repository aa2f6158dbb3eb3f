pub mod assembler;
pub mod audio;
pub mod error;
pub mod job;
pub mod settings;
pub mod text;
pub mod tts;

pub use assembler::{AudioAssembler, GapPolicy, Segment, SynthesisMode};
pub use error::{UnitKind, VoiceNoteError};
pub use job::VoiceNoteJob;
pub use settings::{Settings, SettingsManager};
pub use tts::TextToSpeech;
