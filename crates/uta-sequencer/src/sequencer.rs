//! Note playback against absolute deadlines.

use crate::error::{Error, Result};
use crate::note::{Melody, Note};
use crate::timer::{PreciseTimer, Timer};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};
use uta_midi_io::DeviceSession;

/// Lateness above which a note-on is reported at `warn` level.
const LATE_WARN_THRESHOLD: Duration = Duration::from_millis(5);

/// When notes are released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleasePolicy {
    /// One note-off after the final note only. Consecutive notes slur into
    /// each other, which is how the NSX-39 advances through its lyric.
    #[default]
    Legato,
    /// A note-off after every note.
    Detached,
}

/// Shared flag for stopping a performance from another thread.
///
/// Checked between notes, so a stop takes effect once the current hold ends.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// When one note-on was due and when it actually went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteTiming {
    pub index: usize,
    pub scheduled: Instant,
    pub actual: Instant,
}

impl NoteTiming {
    pub fn lateness(&self) -> Duration {
        self.actual.saturating_duration_since(self.scheduled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackReport {
    pub started: Instant,
    pub finished: Instant,
    pub timings: Vec<NoteTiming>,
}

impl PlaybackReport {
    pub fn elapsed(&self) -> Duration {
        self.finished.saturating_duration_since(self.started)
    }

    pub fn max_lateness(&self) -> Duration {
        self.timings
            .iter()
            .map(NoteTiming::lateness)
            .max()
            .unwrap_or_default()
    }

    /// Gaps between consecutive note-on sends.
    pub fn intervals(&self) -> Vec<Duration> {
        self.timings
            .windows(2)
            .map(|w| w[1].actual.saturating_duration_since(w[0].actual))
            .collect()
    }
}

/// Plays a [`Melody`] through a [`DeviceSession`].
///
/// Each note-on is scheduled at the sum of all previous holds, measured from
/// the first note-on, so a late note does not push back the ones after it.
pub struct Sequencer<T: Timer = PreciseTimer> {
    timer: T,
    release_policy: ReleasePolicy,
    cancel: Option<CancelToken>,
    sounding: Option<Note>,
}

impl Sequencer<PreciseTimer> {
    pub fn new() -> Self {
        Self::with_timer(PreciseTimer::default())
    }
}

impl Default for Sequencer<PreciseTimer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Timer> Sequencer<T> {
    pub fn with_timer(timer: T) -> Self {
        Self {
            timer,
            release_policy: ReleasePolicy::default(),
            cancel: None,
            sounding: None,
        }
    }

    pub fn release_policy(mut self, policy: ReleasePolicy) -> Self {
        self.release_policy = policy;
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn set_cancel_token(&mut self, token: Option<CancelToken>) {
        self.cancel = token;
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// The note that has been switched on and not yet released, if any.
    ///
    /// Set after a performance fails part way; [`release`](Self::release)
    /// clears it.
    pub fn sounding(&self) -> Option<Note> {
        self.sounding
    }

    /// Validate three parallel arrays and perform them. Nothing is sent if
    /// validation fails.
    pub fn perform_parts<S: DeviceSession + ?Sized>(
        &mut self,
        session: &mut S,
        pitches: &[i32],
        velocities: &[i32],
        durations: &[f64],
    ) -> Result<PlaybackReport> {
        let melody = Melody::from_parts(pitches, velocities, durations)?;
        self.perform(session, &melody)
    }

    /// Play every note in order and block until the last hold has elapsed.
    ///
    /// A device error stops playback at once and leaves the current note
    /// sounding; use [`PlaybackGuard`] or call [`release`](Self::release).
    /// A note still sounding from an earlier failed call is released before
    /// the first note-on.
    pub fn perform<S: DeviceSession + ?Sized>(
        &mut self,
        session: &mut S,
        melody: &Melody,
    ) -> Result<PlaybackReport> {
        if let Some(stale) = self.sounding {
            warn!(pitch = stale.pitch(), "releasing note left by a failed performance");
            self.release(session)?;
        }

        debug!(
            notes = melody.len(),
            duration_ms = melody.total_duration().as_millis() as u64,
            policy = ?self.release_policy,
            "performance start"
        );

        let started = self.timer.now();
        let mut deadline = started;
        let mut timings = Vec::with_capacity(melody.len());

        for (index, note) in melody.iter().enumerate() {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                debug!(index, "performance cancelled");
                self.release(session)?;
                return Err(Error::Cancelled);
            }

            let actual = self.timer.now();
            session.note_on(note.pitch(), note.velocity())?;
            self.sounding = Some(*note);

            let timing = NoteTiming {
                index,
                scheduled: deadline,
                actual,
            };
            let lateness = timing.lateness();
            if lateness > LATE_WARN_THRESHOLD {
                warn!(index, lateness_us = lateness.as_micros() as u64, "note-on late");
            } else {
                trace!(index, lateness_us = lateness.as_micros() as u64, "note-on");
            }
            timings.push(timing);

            deadline = deadline
                .checked_add(note.hold())
                .ok_or(Error::InvalidDuration {
                    index,
                    value: note.hold().as_secs_f64(),
                })?;
            self.timer.wait_until(deadline);

            if self.release_policy == ReleasePolicy::Detached {
                self.release(session)?;
            }
        }

        self.release(session)?;

        let report = PlaybackReport {
            started,
            finished: self.timer.now(),
            timings,
        };
        debug!(
            elapsed_ms = report.elapsed().as_millis() as u64,
            max_lateness_us = report.max_lateness().as_micros() as u64,
            "performance done"
        );
        Ok(report)
    }

    /// Send a note-off for the sounding note, with its own pitch and velocity.
    /// Does nothing when no note is sounding.
    pub fn release<S: DeviceSession + ?Sized>(&mut self, session: &mut S) -> Result<()> {
        if let Some(note) = self.sounding.take() {
            session.note_off(note.pitch(), note.velocity())?;
        }
        Ok(())
    }
}

/// Releases the sounding note when dropped.
///
/// Holds the sequencer and session for the length of a performance, so the
/// note-off goes out on every exit path, panics included.
pub struct PlaybackGuard<'a, T: Timer, S: DeviceSession + ?Sized> {
    sequencer: &'a mut Sequencer<T>,
    session: &'a mut S,
}

impl<'a, T: Timer, S: DeviceSession + ?Sized> PlaybackGuard<'a, T, S> {
    pub fn new(sequencer: &'a mut Sequencer<T>, session: &'a mut S) -> Self {
        Self { sequencer, session }
    }

    pub fn perform(&mut self, melody: &Melody) -> Result<PlaybackReport> {
        self.sequencer.perform(&mut *self.session, melody)
    }

    pub fn session(&mut self) -> &mut S {
        &mut *self.session
    }
}

impl<T: Timer, S: DeviceSession + ?Sized> Drop for PlaybackGuard<'_, T, S> {
    fn drop(&mut self) {
        if let Some(note) = self.sequencer.sounding() {
            if let Err(e) = self.sequencer.release(&mut *self.session) {
                warn!(pitch = note.pitch(), error = %e, "failed to release note");
            } else {
                debug!(pitch = note.pitch(), "released sounding note");
            }
        }
    }
}
