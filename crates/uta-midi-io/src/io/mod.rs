//! Hardware MIDI output.
//!
//! Device enumeration, connection, and transmission via midir.
//! Requires the `midi-io` feature.

mod output;
mod session;

pub use output::{MidiOutputDevice, MidiOutputManager};
pub use session::MidiOutputSession;
