//! Centralized error type for the uta umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Lyric: {0}")]
    Lyric(#[from] uta_lyric::Error),

    #[error("MIDI: {0}")]
    Midi(#[from] uta_midi_io::Error),

    #[error("Sequencer: {0}")]
    Sequencer(#[from] uta_sequencer::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
