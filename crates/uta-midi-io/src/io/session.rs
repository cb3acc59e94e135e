//! Device session over a hardware output port.

use super::output::MidiOutputManager;
use crate::error::{Error, Result};
use crate::message::MidiOutputMessage;
use crate::session::DeviceSession;
use std::sync::Arc;
use tracing::debug;

/// A connected output port plus the channel notes are sent on.
///
/// Dropping the session disconnects the port.
pub struct MidiOutputSession {
    manager: Arc<MidiOutputManager>,
    channel: u8,
    device_name: String,
}

impl MidiOutputSession {
    pub fn open(device_index: usize, channel: u8) -> Result<Self> {
        check_channel(channel)?;
        let manager = Arc::new(MidiOutputManager::new()?);
        let device_name = manager.connect(device_index)?;
        Ok(Self {
            manager,
            channel,
            device_name,
        })
    }

    /// Connect to the first output whose name contains `name` (case-insensitive).
    pub fn open_by_name(name: &str, channel: u8) -> Result<Self> {
        check_channel(channel)?;
        let manager = Arc::new(MidiOutputManager::new()?);
        let device_name = manager.connect_by_name(name)?;
        Ok(Self {
            manager,
            channel,
            device_name,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn is_connected(&self) -> bool {
        self.manager.is_connected()
    }

    pub fn close(self) {
        drop(self);
    }
}

fn check_channel(channel: u8) -> Result<()> {
    if channel > 15 {
        return Err(Error::InvalidConfig(format!(
            "MIDI channel {} out of range (0-15)",
            channel
        )));
    }
    Ok(())
}

impl DeviceSession for MidiOutputSession {
    fn channel(&self) -> u8 {
        self.channel
    }

    fn send_message(&mut self, message: MidiOutputMessage) -> Result<()> {
        self.manager.send_message(message)
    }
}

impl Drop for MidiOutputSession {
    fn drop(&mut self) {
        debug!(device = %self.device_name, "closing MIDI output session");
        self.manager.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_checked_before_connecting() {
        let result = MidiOutputSession::open_by_name("no such device", 16);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
