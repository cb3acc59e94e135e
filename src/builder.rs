//! Builder for configuring and constructing a `Singer`.

use crate::config::SingerConfig;
use crate::error::Result;
use crate::singer::Singer;
use std::time::Duration;
use uta_midi_io::DeviceSession;
use uta_sequencer::{CancelToken, ReleasePolicy, Timer};

#[cfg(feature = "midi-io")]
use uta_midi_io::MidiOutputSession;

/// Starts from [`SingerConfig::default`], which targets an NSX-39 on
/// channel 0 with the singing voice selected.
///
/// # Example
///
/// ```ignore
/// use uta::prelude::*;
///
/// let singer = Singer::builder()
///     .channel(1)
///     .release_policy(ReleasePolicy::Detached)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SingerBuilder {
    config: SingerConfig,
    cancel: Option<CancelToken>,
}

impl SingerBuilder {
    /// Replace every setting at once, e.g. with a config loaded from disk.
    pub fn config(mut self, config: SingerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn device_name(mut self, name: impl Into<String>) -> Self {
        self.config.device_name = name.into();
        self
    }

    /// Default: 0
    pub fn channel(mut self, channel: u8) -> Self {
        self.config.channel = channel;
        self
    }

    /// Default: 0 (singing voice)
    pub fn program(mut self, program: u8) -> Self {
        self.config.program = Some(program);
        self
    }

    /// Leave the device's instrument as it is.
    pub fn no_program_change(mut self) -> Self {
        self.config.program = None;
        self
    }

    /// Default: 80
    pub fn default_velocity(mut self, velocity: u8) -> Self {
        self.config.default_velocity = velocity;
        self
    }

    /// Default: 64. `None` disables the limit.
    pub fn max_lyric_length(mut self, max: Option<usize>) -> Self {
        self.config.max_lyric_length = max;
        self
    }

    pub fn release_policy(mut self, policy: ReleasePolicy) -> Self {
        self.config.release_policy = policy;
        self
    }

    pub fn spin_threshold(mut self, threshold: Duration) -> Self {
        self.config.spin_threshold = threshold;
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Open the hardware output named by the config.
    #[cfg(feature = "midi-io")]
    pub fn build(self) -> Result<Singer<MidiOutputSession>> {
        let mut singer = Singer::open(self.config)?;
        if let Some(token) = self.cancel {
            singer.set_cancel_token(token);
        }
        Ok(singer)
    }

    /// Sing through `session` instead of opening a port. The session's own
    /// channel is used; `channel` only applies to [`build`](Self::build).
    pub fn build_with_session<S: DeviceSession>(self, session: S) -> Result<Singer<S>> {
        let mut singer = Singer::with_session(session, self.config)?;
        if let Some(token) = self.cancel {
            singer.set_cancel_token(token);
        }
        Ok(singer)
    }

    pub fn build_with_timer<S: DeviceSession, T: Timer>(
        self,
        session: S,
        timer: T,
    ) -> Result<Singer<S, T>> {
        let mut singer = Singer::with_timer(session, self.config, timer)?;
        if let Some(token) = self.cancel {
            singer.set_cancel_token(token);
        }
        Ok(singer)
    }
}
