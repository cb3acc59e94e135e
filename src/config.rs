//! Singer configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uta_lyric::DEFAULT_MAX_PHONEMES;
use uta_sequencer::{ReleasePolicy, DEFAULT_SPIN_THRESHOLD};

/// Port name the NSX-39 registers under. The trailing space keeps it from
/// matching look-alike names such as "NSX-390".
pub const DEFAULT_DEVICE_NAME: &str = "NSX-39 ";

/// Program that selects the singing voice on the NSX-39.
pub const SINGING_VOICE_PROGRAM: u8 = 0;

const MAX_SPIN_THRESHOLD: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingerConfig {
    /// Case-insensitive partial match against output port names.
    pub device_name: String,
    pub channel: u8,
    /// Program change sent before each performance. `None` leaves the
    /// device's current instrument alone.
    pub program: Option<u8>,
    pub default_velocity: u8,
    /// Longest lyric, in phonemes, accepted before anything is sent.
    /// `None` disables the check.
    pub max_lyric_length: Option<usize>,
    pub release_policy: ReleasePolicy,
    pub spin_threshold: Duration,
}

impl Default for SingerConfig {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            channel: 0,
            program: Some(SINGING_VOICE_PROGRAM),
            default_velocity: 80,
            max_lyric_length: Some(DEFAULT_MAX_PHONEMES),
            release_policy: ReleasePolicy::Legato,
            spin_threshold: DEFAULT_SPIN_THRESHOLD,
        }
    }
}

impl SingerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.device_name.trim().is_empty() {
            return Err(Error::InvalidConfig("device_name is empty".to_string()));
        }
        if self.channel > 15 {
            return Err(Error::InvalidConfig(format!(
                "channel {} out of range (0-15)",
                self.channel
            )));
        }
        if let Some(program) = self.program {
            if program > 127 {
                return Err(Error::InvalidConfig(format!(
                    "program {} out of range (0-127)",
                    program
                )));
            }
        }
        if self.default_velocity > 127 {
            return Err(Error::InvalidConfig(format!(
                "default_velocity {} out of range (0-127)",
                self.default_velocity
            )));
        }
        if self.max_lyric_length == Some(0) {
            return Err(Error::InvalidConfig(
                "max_lyric_length must be at least 1".to_string(),
            ));
        }
        if self.spin_threshold > MAX_SPIN_THRESHOLD {
            return Err(Error::InvalidConfig(format!(
                "spin_threshold {:?} exceeds {:?}",
                self.spin_threshold, MAX_SPIN_THRESHOLD
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SingerConfig::default();
        assert_eq!(config.device_name, "NSX-39 ");
        assert_eq!(config.program, Some(0));
        assert_eq!(config.max_lyric_length, Some(64));
        assert_eq!(config.release_policy, ReleasePolicy::Legato);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_channel() {
        let config = SingerConfig {
            channel: 16,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_values() {
        let bad = [
            SingerConfig {
                device_name: "  ".to_string(),
                ..Default::default()
            },
            SingerConfig {
                program: Some(128),
                ..Default::default()
            },
            SingerConfig {
                default_velocity: 200,
                ..Default::default()
            },
            SingerConfig {
                max_lyric_length: Some(0),
                ..Default::default()
            },
            SingerConfig {
                spin_threshold: Duration::from_secs(1),
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_no_limit_and_no_program_are_valid() {
        let config = SingerConfig {
            program: None,
            max_lyric_length: None,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
