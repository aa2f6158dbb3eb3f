//! Drives synthesis for one invocation and folds the results into a single
//! PCM stream with silence between units.
//!
//! Units are synthesized strictly one after another, in list order. The first
//! failing unit aborts the whole assembly and nothing partial is returned.

pub mod segment;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::audio::pcm::{silence, PcmBuffer, SAMPLE_RATE};
use crate::error::{Result, UnitKind, VoiceNoteError};
use crate::text::chunk_text;
use crate::tts::{SynthesisRequest, TextToSpeech};

pub use segment::{parse_segments, Segment, VoiceDefaults};

/// What the caller asked to have spoken
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisMode {
    /// One piece of inline text, sent as a single request
    SingleText(String),
    /// A document that is chunked on sentence boundaries
    Document(String),
    /// An ordered list of segments, each possibly with its own voice
    MultiSegment(Vec<Segment>),
}

/// Where silence is placed when a segment list contains blank entries
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "kebab-case")]
pub enum GapPolicy {
    /// A gap follows every synthesized unit whose original list position is
    /// not the last one. A blank final segment therefore leaves a trailing gap.
    #[default]
    OriginalIndex,
    /// Exactly one gap between each adjacent pair of synthesized units
    BetweenUnits,
}

#[derive(Debug, Clone)]
pub struct AssemblyOptions {
    pub defaults: VoiceDefaults,
    pub pause_seconds: f64,
    pub chunk_size: usize,
    pub gap_policy: GapPolicy,
}

/// A unit of work at its original list position. `request` is `None` for
/// segments skipped because their text is blank.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedUnit {
    pub kind: UnitKind,
    pub index: usize,
    pub request: Option<SynthesisRequest>,
}

#[derive(Debug)]
pub struct Assembly {
    pub pcm: PcmBuffer,
    pub synthesized: usize,
    pub gaps: usize,
}

pub struct AudioAssembler {
    tts: Arc<dyn TextToSpeech>,
    options: AssemblyOptions,
}

impl AudioAssembler {
    pub fn new(tts: Arc<dyn TextToSpeech>, options: AssemblyOptions) -> Self {
        Self { tts, options }
    }

    /// Turn a mode into its ordered units, rejecting inputs that have nothing
    /// to speak. Makes no network calls.
    pub fn plan(&self, mode: &SynthesisMode) -> Result<Vec<PlannedUnit>> {
        let defaults = &self.options.defaults;

        let units: Vec<PlannedUnit> = match mode {
            SynthesisMode::SingleText(text) => {
                if text.trim().is_empty() {
                    return Err(VoiceNoteError::input("text is empty"));
                }
                vec![PlannedUnit {
                    kind: UnitKind::Text,
                    index: 0,
                    request: Some(defaults.request(text.as_str())),
                }]
            }
            SynthesisMode::Document(text) => {
                let chunks = chunk_text(text, self.options.chunk_size);
                if chunks.is_empty() {
                    return Err(VoiceNoteError::input("document is empty"));
                }
                chunks
                    .into_iter()
                    .enumerate()
                    .map(|(index, chunk)| PlannedUnit {
                        kind: UnitKind::Chunk,
                        index,
                        request: Some(defaults.request(chunk)),
                    })
                    .collect()
            }
            SynthesisMode::MultiSegment(segments) => {
                if segments.iter().all(Segment::is_blank) {
                    return Err(VoiceNoteError::input("no segment contains any text"));
                }
                segments
                    .iter()
                    .enumerate()
                    .map(|(index, segment)| PlannedUnit {
                        kind: UnitKind::Segment,
                        index,
                        request: segment.resolve(defaults),
                    })
                    .collect()
            }
        };

        Ok(units)
    }

    pub async fn assemble(&self, mode: &SynthesisMode) -> Result<Assembly> {
        let units = self.plan(mode)?;
        let last_index = units.len().saturating_sub(1);
        let total = units.iter().filter(|u| u.request.is_some()).count();
        let gap = silence(self.options.pause_seconds);

        info!(
            provider = self.tts.name(),
            units = units.len(),
            synthesized = total,
            gap_policy = %self.options.gap_policy,
            "Assembling audio"
        );

        let mut pcm = PcmBuffer::new();
        let mut synthesized = 0;
        let mut gaps = 0;

        for unit in &units {
            let Some(request) = &unit.request else {
                warn!("Skipping {} {}: no text", unit.kind, unit.index);
                continue;
            };

            let audio = self.tts.synthesize(request).await.map_err(|reason| {
                error!(
                    "Synthesis failed on {} {} (voice={}): {reason}",
                    unit.kind, unit.index, request.voice
                );
                VoiceNoteError::Synthesis {
                    kind: unit.kind,
                    index: unit.index,
                    voice: request.voice.clone(),
                    reason,
                }
            })?;

            if audio.sample_rate != SAMPLE_RATE || audio.channels != 1 {
                warn!(
                    "{} {} returned {} Hz / {} channel(s), expected {} Hz mono",
                    unit.kind, unit.index, audio.sample_rate, audio.channels, SAMPLE_RATE
                );
            }

            debug!(
                "{} {} (voice={}) -> {} bytes",
                unit.kind,
                unit.index,
                request.voice,
                audio.pcm_data.len()
            );
            pcm.append(&audio.pcm_data);
            synthesized += 1;

            let gap_follows = match self.options.gap_policy {
                GapPolicy::OriginalIndex => unit.index < last_index,
                GapPolicy::BetweenUnits => synthesized < total,
            };
            if gap_follows {
                pcm.append(&gap);
                gaps += 1;
            }
        }

        info!(
            "Assembled {} unit(s) with {} gap(s): {:.2}s of audio",
            synthesized,
            gaps,
            pcm.duration_secs()
        );

        Ok(Assembly {
            pcm,
            synthesized,
            gaps,
        })
    }
}
