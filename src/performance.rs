//! A lyric and the melody it is sung to.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uta_lyric::{ExclusiveMessage, LyricEncoder};
use uta_sequencer::Melody;

/// Everything needed to sing one phrase, validated up front.
///
/// The device steps through the loaded lyric one phoneme per note-on, so
/// the two lengths usually match. They are not required to: extra notes
/// wrap around to the start of the lyric, extra phonemes are never sung.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    lyric: ExclusiveMessage,
    melody: Melody,
}

impl Performance {
    pub fn new(lyric: ExclusiveMessage, melody: Melody) -> Self {
        Self { lyric, melody }
    }

    /// Encode `text` and validate the note arrays. Fails on the first
    /// problem found; lyric errors are reported before melody errors.
    pub fn compose(
        encoder: &LyricEncoder<'_>,
        text: &str,
        pitches: &[i32],
        velocities: &[i32],
        durations: &[f64],
    ) -> Result<Self> {
        let lyric = encoder.encode(text)?;
        let melody = Melody::from_parts(pitches, velocities, durations)?;
        if lyric.phoneme_count() != melody.len() {
            debug!(
                phonemes = lyric.phoneme_count(),
                notes = melody.len(),
                "lyric and melody lengths differ"
            );
        }
        Ok(Self { lyric, melody })
    }

    pub fn lyric(&self) -> &ExclusiveMessage {
        &self.lyric
    }

    pub fn melody(&self) -> &Melody {
        &self.melody
    }

    pub fn into_parts(self) -> (ExclusiveMessage, Melody) {
        (self.lyric, self.melody)
    }
}
