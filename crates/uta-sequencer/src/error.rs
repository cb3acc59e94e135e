//! Error types for the playback sequencer.

use thiserror::Error;

/// Which field of a note failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Pitch,
    Velocity,
}

impl std::fmt::Display for NoteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteField::Pitch => write!(f, "pitch"),
            NoteField::Velocity => write!(f, "velocity"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(
        "Malformed performance: {pitches} pitches, {velocities} velocities, {durations} durations"
    )]
    MalformedPerformance {
        pitches: usize,
        velocities: usize,
        durations: usize,
    },

    #[error("Empty note sequence")]
    EmptySequence,

    #[error("Note {index}: {field} {value} out of range (0-127)")]
    OutOfRange {
        field: NoteField,
        index: usize,
        value: i64,
    },

    #[error("Note {index}: hold {value}s must be finite and between 0 and 3600s")]
    InvalidDuration { index: usize, value: f64 },

    #[error("Performance cancelled")]
    Cancelled,

    #[error("Device: {0}")]
    Device(#[from] uta_midi_io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
