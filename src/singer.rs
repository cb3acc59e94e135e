//! The singing orchestrator.

use crate::config::SingerConfig;
use crate::error::Result;
use crate::performance::Performance;
use tracing::{debug, info};
use uta_lyric::{ExclusiveMessage, LyricEncoder, PhonemeTable};
use uta_midi_io::DeviceSession;
use uta_sequencer::{
    CancelToken, Melody, PlaybackGuard, PlaybackReport, PreciseTimer, Sequencer, Timer,
};

#[cfg(feature = "midi-io")]
use uta_midi_io::MidiOutputSession;

/// Drives one device session: loads lyrics, selects the voice, and plays
/// melodies.
///
/// Every performance runs under a [`PlaybackGuard`], so whichever way it
/// ends the last sounded note is released before control returns.
///
/// # Example
///
/// ```ignore
/// use uta::prelude::*;
///
/// let mut singer = Singer::builder().build()?;
/// singer.sing_text("さくら", &[69, 69, 71], &[80; 3], &[0.5, 0.5, 1.0])?;
/// ```
pub struct Singer<S: DeviceSession, T: Timer = PreciseTimer> {
    session: S,
    sequencer: Sequencer<T>,
    config: SingerConfig,
    table: &'static PhonemeTable,
}

#[cfg(feature = "midi-io")]
impl Singer<MidiOutputSession> {
    pub fn builder() -> crate::SingerBuilder {
        crate::SingerBuilder::default()
    }

    /// Connect to the first output port matching `config.device_name`.
    pub fn open(config: SingerConfig) -> Result<Self> {
        config.validate()?;
        let session = MidiOutputSession::open_by_name(&config.device_name, config.channel)?;
        info!(device = %session.device_name(), "singer ready");
        Self::with_session(session, config)
    }
}

impl<S: DeviceSession> Singer<S> {
    /// Use an existing session with the real-time timer.
    pub fn with_session(session: S, config: SingerConfig) -> Result<Self> {
        let timer = PreciseTimer::new(config.spin_threshold);
        Self::with_timer(session, config, timer)
    }
}

impl<S: DeviceSession, T: Timer> Singer<S, T> {
    pub fn with_timer(session: S, config: SingerConfig, timer: T) -> Result<Self> {
        config.validate()?;
        let sequencer = Sequencer::with_timer(timer).release_policy(config.release_policy);
        Ok(Self {
            session,
            sequencer,
            config,
            table: PhonemeTable::global(),
        })
    }

    /// Stop performances started after this call once `token` is cancelled.
    pub fn set_cancel_token(&mut self, token: CancelToken) {
        self.sequencer.set_cancel_token(Some(token));
    }

    pub fn config(&self) -> &SingerConfig {
        &self.config
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn timer(&self) -> &T {
        self.sequencer.timer()
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Encoder honoring the configured lyric limit.
    pub fn encoder(&self) -> LyricEncoder<'static> {
        LyricEncoder::new(self.table).max_phonemes(self.config.max_lyric_length)
    }

    /// Encode and validate without sending anything.
    pub fn compose(
        &self,
        text: &str,
        pitches: &[i32],
        velocities: &[i32],
        durations: &[f64],
    ) -> Result<Performance> {
        Performance::compose(&self.encoder(), text, pitches, velocities, durations)
    }

    /// [`compose`](Self::compose) with the configured default velocity on
    /// every note.
    pub fn compose_uniform(
        &self,
        text: &str,
        pitches: &[i32],
        durations: &[f64],
    ) -> Result<Performance> {
        let velocities = vec![i32::from(self.config.default_velocity); pitches.len()];
        self.compose(text, pitches, &velocities, durations)
    }

    /// Send the configured program change, if any.
    pub fn select_voice(&mut self) -> Result<()> {
        if let Some(program) = self.config.program {
            debug!(program, "program change");
            self.session.program_change(program)?;
        }
        Ok(())
    }

    /// Encode `text` and send it as the device's current lyric.
    pub fn load_lyrics(&mut self, text: &str) -> Result<ExclusiveMessage> {
        let message = self.encoder().encode(text)?;
        self.send_lyric(&message)?;
        Ok(message)
    }

    pub fn send_lyric(&mut self, message: &ExclusiveMessage) -> Result<()> {
        debug!(phonemes = message.phoneme_count(), "loading lyric");
        self.session.send_exclusive(message.as_bytes())?;
        Ok(())
    }

    /// Play `melody` against whatever lyric is loaded.
    pub fn perform(&mut self, melody: &Melody) -> Result<PlaybackReport> {
        let mut guard = PlaybackGuard::new(&mut self.sequencer, &mut self.session);
        Ok(guard.perform(melody)?)
    }

    /// Select the voice, load the lyric, then play the melody.
    pub fn sing(&mut self, performance: &Performance) -> Result<PlaybackReport> {
        self.select_voice()?;
        self.send_lyric(performance.lyric())?;
        let report = self.perform(performance.melody())?;
        info!(
            notes = performance.melody().len(),
            elapsed_ms = report.elapsed().as_millis() as u64,
            "performance finished"
        );
        Ok(report)
    }

    /// Validate everything, then sing. Nothing is sent if any input is bad.
    pub fn sing_text(
        &mut self,
        text: &str,
        pitches: &[i32],
        velocities: &[i32],
        durations: &[f64],
    ) -> Result<PlaybackReport> {
        let performance = self.compose(text, pitches, velocities, durations)?;
        self.sing(&performance)
    }
}
