//! # uta - singing driver for the NSX-39
//!
//! Makes a Pocket Miku (Yamaha NSX-39) sing: Japanese lyrics go out as one
//! System Exclusive message, then a melody is played as timed note events,
//! each note-on advancing the device one phoneme through the lyric.
//!
//! ## Architecture
//!
//! uta is an umbrella crate that coordinates:
//! - **uta-lyric** - Phoneme catalog, lyric tokenizer, SysEx framing
//! - **uta-midi-io** - Device sessions (hardware output via midir, capture for dry runs)
//! - **uta-sequencer** - Melody validation and deadline-based note playback
//!
//! ## Quick Start
//!
//! ```ignore
//! use uta::prelude::*;
//!
//! let mut singer = Singer::builder().build()?;
//! singer.sing_text(
//!     "あいう",
//!     &[60, 62, 64],
//!     &[80, 80, 80],
//!     &[0.5, 0.5, 1.0],
//! )?;
//! ```
//!
//! ## Feature Flags
//!
//! - `midi-io` (default) - Hardware MIDI output through midir

pub use uta_lyric as lyric;
pub use uta_midi_io as midi;
pub use uta_sequencer as sequencer;

pub use uta_lyric::{ExclusiveMessage, LyricEncoder, PhonemeCode, PhonemeTable, Token};
pub use uta_midi_io::{CaptureSession, DeviceSession, MessageKind, MidiOutputMessage};
pub use uta_sequencer::{
    CancelToken, Melody, Note, PlaybackReport, PreciseTimer, ReleasePolicy, Sequencer, Timer,
    VirtualTimer,
};

#[cfg(feature = "midi-io")]
pub use uta_midi_io::{MidiOutputDevice, MidiOutputManager, MidiOutputSession};

mod builder;
mod config;
mod error;
mod performance;
mod singer;

pub use builder::SingerBuilder;
pub use config::{SingerConfig, DEFAULT_DEVICE_NAME, SINGING_VOICE_PROGRAM};
pub use error::{Error, Result};
pub use performance::Performance;
pub use singer::Singer;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{Error, Performance, Result, Singer, SingerBuilder, SingerConfig};

    pub use crate::{LyricEncoder, PhonemeTable};

    pub use crate::{CaptureSession, DeviceSession};

    pub use crate::{CancelToken, Melody, ReleasePolicy, VirtualTimer};

    #[cfg(feature = "midi-io")]
    pub use crate::MidiOutputSession;
}
