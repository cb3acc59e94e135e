//! MIDI output subsystem for the uta singing driver.
//!
//! Provides the [`DeviceSession`] boundary the sequencer talks to, raw
//! message builders, a hardware session over midir, and a capturing session
//! for dry runs and tests.
//!
//! Feature gates: `midi-io` (hardware output via midir, on by default).
//!
//! # Example
//!
//! ```ignore
//! use uta_midi_io::{DeviceSession, MidiOutputSession};
//!
//! let mut session = MidiOutputSession::open_by_name("NSX-39 ", 0)?;
//! session.program_change(0)?;
//! session.note_on(60, 80)?;
//! ```

pub mod error;
pub use error::{Error, Result};

mod message;
pub use message::{MessageKind, MidiOutputMessage};

mod session;
pub use session::DeviceSession;

mod capture;
pub use capture::{CaptureSession, CapturedMessage};

#[cfg(feature = "midi-io")]
pub(crate) mod io;

#[cfg(feature = "midi-io")]
pub use io::{MidiOutputDevice, MidiOutputManager, MidiOutputSession};
