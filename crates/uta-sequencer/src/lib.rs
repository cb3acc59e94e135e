//! Playback sequencer for the uta singing driver.
//!
//! Turns validated [`Melody`] values into timed note-on/note-off traffic on a
//! [`uta_midi_io::DeviceSession`].
//!
//! ```ignore
//! use uta_sequencer::{Melody, Sequencer};
//!
//! let melody = Melody::from_parts(&[60, 62], &[80, 80], &[0.5, 0.5])?;
//! let report = Sequencer::new().perform(&mut session, &melody)?;
//! println!("worst lateness: {:?}", report.max_lateness());
//! ```

pub mod error;
pub use error::{Error, NoteField, Result};

mod note;
pub use note::{Melody, Note, RawNote, MAX_HOLD};

pub mod timer;
pub use timer::{PreciseTimer, Timer, VirtualTimer, DEFAULT_SPIN_THRESHOLD};

mod sequencer;
pub use sequencer::{
    CancelToken, NoteTiming, PlaybackGuard, PlaybackReport, ReleasePolicy, Sequencer,
};
