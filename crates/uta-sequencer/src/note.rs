//! Notes and validated melodies.

use crate::error::{Error, NoteField, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MIDI_DATA_MAX: i64 = 127;

/// Longest hold a single note may carry.
pub const MAX_HOLD: Duration = Duration::from_secs(3600);

/// One sung note: pitch and velocity in MIDI units, held for `hold`.
///
/// Fields are only reachable through checked constructors, deserialization
/// included, so a `Note` always fits the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNote", into = "RawNote")]
pub struct Note {
    pitch: u8,
    velocity: u8,
    hold: Duration,
}

impl Note {
    pub fn new(pitch: u8, velocity: u8, hold: Duration) -> Result<Self> {
        Self::checked(0, pitch.into(), velocity.into(), hold.as_secs_f64())
    }

    pub fn pitch(&self) -> u8 {
        self.pitch
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    /// Build a note from loosely typed input, as it arrives from a score or
    /// a command line. `index` is reported back in errors.
    fn checked(index: usize, pitch: i64, velocity: i64, hold_secs: f64) -> Result<Self> {
        let pitch = check_data(NoteField::Pitch, index, pitch)?;
        let velocity = check_data(NoteField::Velocity, index, velocity)?;
        if !hold_secs.is_finite() || hold_secs < 0.0 || hold_secs > MAX_HOLD.as_secs_f64() {
            return Err(Error::InvalidDuration {
                index,
                value: hold_secs,
            });
        }
        let hold = Duration::try_from_secs_f64(hold_secs).map_err(|_| Error::InvalidDuration {
            index,
            value: hold_secs,
        })?;
        Ok(Self {
            pitch,
            velocity,
            hold,
        })
    }
}

fn check_data(field: NoteField, index: usize, value: i64) -> Result<u8> {
    if (0..=MIDI_DATA_MAX).contains(&value) {
        Ok(value as u8)
    } else {
        Err(Error::OutOfRange {
            field,
            index,
            value,
        })
    }
}

/// A note as it appears in a serialized score, before any checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawNote {
    pub pitch: i64,
    pub velocity: i64,
    pub hold: Duration,
}

impl RawNote {
    fn validate(self, index: usize) -> Result<Note> {
        Note::checked(index, self.pitch, self.velocity, self.hold.as_secs_f64())
    }
}

impl TryFrom<RawNote> for Note {
    type Error = Error;

    fn try_from(raw: RawNote) -> Result<Self> {
        raw.validate(0)
    }
}

impl From<Note> for RawNote {
    fn from(note: Note) -> Self {
        Self {
            pitch: note.pitch.into(),
            velocity: note.velocity.into(),
            hold: note.hold,
        }
    }
}

/// A non-empty, fully validated sequence of notes.
///
/// Holding a `Melody` means every pitch and velocity is 7-bit and every hold
/// lies between zero and [`MAX_HOLD`], so playback never has to abort
/// half-way through on bad input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RawNote>", into = "Vec<RawNote>")]
pub struct Melody {
    notes: Vec<Note>,
}

impl Melody {
    /// Zip three parallel arrays into a melody.
    ///
    /// Lengths are compared first, then emptiness, then each note in order;
    /// the first problem found is returned.
    pub fn from_parts(pitches: &[i32], velocities: &[i32], durations: &[f64]) -> Result<Self> {
        if pitches.len() != velocities.len() || pitches.len() != durations.len() {
            return Err(Error::MalformedPerformance {
                pitches: pitches.len(),
                velocities: velocities.len(),
                durations: durations.len(),
            });
        }
        if pitches.is_empty() {
            return Err(Error::EmptySequence);
        }

        let notes = pitches
            .iter()
            .zip(velocities)
            .zip(durations)
            .enumerate()
            .map(|(index, ((&pitch, &velocity), &hold))| {
                Note::checked(index, pitch.into(), velocity.into(), hold)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { notes })
    }

    /// Same velocity for every note, as a simple score usually wants.
    pub fn with_velocity(pitches: &[i32], velocity: i32, durations: &[f64]) -> Result<Self> {
        let velocities = vec![velocity; pitches.len()];
        Self::from_parts(pitches, &velocities, durations)
    }

    pub fn from_notes(notes: Vec<Note>) -> Result<Self> {
        if notes.is_empty() {
            return Err(Error::EmptySequence);
        }
        Ok(Self { notes })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn first(&self) -> &Note {
        &self.notes[0]
    }

    pub fn last(&self) -> &Note {
        &self.notes[self.notes.len() - 1]
    }

    /// Sum of all holds, i.e. the nominal length of a performance.
    pub fn total_duration(&self) -> Duration {
        self.notes
            .iter()
            .fold(Duration::ZERO, |total, n| total.saturating_add(n.hold))
    }
}

impl TryFrom<Vec<Note>> for Melody {
    type Error = Error;

    fn try_from(notes: Vec<Note>) -> Result<Self> {
        Self::from_notes(notes)
    }
}

impl From<Melody> for Vec<Note> {
    fn from(melody: Melody) -> Self {
        melody.notes
    }
}

/// Checks every note, reporting the first bad one by its index.
impl TryFrom<Vec<RawNote>> for Melody {
    type Error = Error;

    fn try_from(raw: Vec<RawNote>) -> Result<Self> {
        let notes = raw
            .into_iter()
            .enumerate()
            .map(|(index, note)| note.validate(index))
            .collect::<Result<Vec<_>>>()?;
        Self::from_notes(notes)
    }
}

impl From<Melody> for Vec<RawNote> {
    fn from(melody: Melody) -> Self {
        melody.notes.into_iter().map(RawNote::from).collect()
    }
}

impl<'a> IntoIterator for &'a Melody {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
