//! The device session boundary.
//!
//! Everything above this crate talks to the synthesizer through
//! [`DeviceSession`]. A session is bound to one output and one channel and
//! is assumed to already point at the right device.

use crate::error::Result;
use crate::message::MidiOutputMessage;
use tracing::trace;

pub trait DeviceSession {
    /// MIDI channel (0-15) used for channel voice messages.
    fn channel(&self) -> u8;

    /// Transmit one complete message. Errors propagate to the caller; nothing
    /// is retried.
    fn send_message(&mut self, message: MidiOutputMessage) -> Result<()>;

    fn send_exclusive(&mut self, bytes: &[u8]) -> Result<()> {
        let message = MidiOutputMessage::system_exclusive(bytes)?;
        trace!(len = bytes.len(), "sysex");
        self.send_message(message)
    }

    fn note_on(&mut self, note: u8, velocity: u8) -> Result<()> {
        trace!(note, velocity, "note on");
        let message = MidiOutputMessage::note_on(self.channel(), note, velocity);
        self.send_message(message)
    }

    fn note_off(&mut self, note: u8, velocity: u8) -> Result<()> {
        trace!(note, velocity, "note off");
        let message = MidiOutputMessage::note_off(self.channel(), note, velocity);
        self.send_message(message)
    }

    fn control_change(&mut self, cc: u8, value: u8) -> Result<()> {
        let message = MidiOutputMessage::control_change(self.channel(), cc, value);
        self.send_message(message)
    }

    /// Select the instrument. On the NSX-39, program 0 is the singing voice.
    fn program_change(&mut self, program: u8) -> Result<()> {
        let message = MidiOutputMessage::program_change(self.channel(), program);
        self.send_message(message)
    }
}

impl<S: DeviceSession + ?Sized> DeviceSession for &mut S {
    fn channel(&self) -> u8 {
        (**self).channel()
    }

    fn send_message(&mut self, message: MidiOutputMessage) -> Result<()> {
        (**self).send_message(message)
    }
}

impl<S: DeviceSession + ?Sized> DeviceSession for Box<S> {
    fn channel(&self) -> u8 {
        (**self).channel()
    }

    fn send_message(&mut self, message: MidiOutputMessage) -> Result<()> {
        (**self).send_message(message)
    }
}
