use thiserror::Error;

/// Why a single synthesis call produced no usable audio
#[derive(Error, Debug)]
pub enum SynthesisFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("expected audio but received {content_type}")]
    NonAudio { content_type: String },

    #[error("empty audio payload")]
    EmptyBody,
}
