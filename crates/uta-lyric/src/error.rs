//! Error types for the lyric subsystem.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown phoneme unit: {0:?}")]
    UnknownPhoneme(String),

    /// `position` is a character index into the lyric as given.
    #[error("Unmapped lyric text at position {position}: no phoneme starts with {found:?}")]
    UnmappedText { position: usize, found: char },

    #[error("Phoneme code {0:#04x} is not a 7-bit MIDI data byte")]
    CodeOutOfRange(u8),

    #[error("Lyric too long: {count} phonemes (device limit {max})")]
    LyricTooLong { count: usize, max: usize },

    #[error("Malformed lyric message: {0}")]
    MalformedMessage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
