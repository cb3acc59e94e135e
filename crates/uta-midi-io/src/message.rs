//! Raw MIDI 1.0 messages as sent to an output port.

use crate::error::{Error, Result};

const SYSEX_START: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;
const CONTROL_CHANGE: u8 = 0xB0;
const PROGRAM_CHANGE: u8 = 0xC0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiOutputMessage {
    pub bytes: Vec<u8>,
}

impl MidiOutputMessage {
    /// Channel is clamped to 0-15 and data bytes are cut to 7 bits, so the
    /// result is always a well-formed channel message.
    fn channel_voice(kind: u8, channel: u8, data: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(1 + data.len());
        bytes.push(kind | channel.min(15));
        bytes.extend(data.iter().map(|b| b & 0x7F));
        Self { bytes }
    }

    pub fn control_change(channel: u8, cc_number: u8, value: u8) -> Self {
        Self::channel_voice(CONTROL_CHANGE, channel, &[cc_number, value])
    }

    pub fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        Self::channel_voice(NOTE_ON, channel, &[note, velocity])
    }

    pub fn note_off(channel: u8, note: u8, velocity: u8) -> Self {
        Self::channel_voice(NOTE_OFF, channel, &[note, velocity])
    }

    pub fn program_change(channel: u8, program: u8) -> Self {
        Self::channel_voice(PROGRAM_CHANGE, channel, &[program])
    }

    /// `bytes` must be a complete exclusive message, `F0 .. F7`, with only
    /// 7-bit data in between. Unlike the channel messages nothing is masked:
    /// a bad payload is rejected.
    pub fn system_exclusive(bytes: &[u8]) -> Result<Self> {
        match bytes {
            [SYSEX_START, data @ .., SYSEX_END] => {
                if let Some(pos) = data.iter().position(|&b| b > 0x7F) {
                    return Err(Error::InvalidMessage(format!(
                        "SysEx data byte {:#04x} at offset {} has the high bit set",
                        data[pos],
                        pos + 1
                    )));
                }
                Ok(Self {
                    bytes: bytes.to_vec(),
                })
            }
            _ => Err(Error::InvalidMessage(
                "SysEx must start with 0xF0 and end with 0xF7".to_string(),
            )),
        }
    }

    pub fn kind(&self) -> MessageKind {
        MessageKind::decode(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decoded view of a [`MidiOutputMessage`], used when inspecting captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ControlChange { channel: u8, cc: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    SystemExclusive { len: usize },
    Other,
}

impl MessageKind {
    pub fn decode(msg: &[u8]) -> Self {
        let Some(&status) = msg.first() else {
            return MessageKind::Other;
        };
        let channel = status & 0x0F;

        match status & 0xF0 {
            NOTE_OFF if msg.len() >= 3 => MessageKind::NoteOff {
                channel,
                note: msg[1],
                velocity: msg[2],
            },
            NOTE_ON if msg.len() >= 3 => MessageKind::NoteOn {
                channel,
                note: msg[1],
                velocity: msg[2],
            },
            CONTROL_CHANGE if msg.len() >= 3 => MessageKind::ControlChange {
                channel,
                cc: msg[1],
                value: msg[2],
            },
            PROGRAM_CHANGE if msg.len() >= 2 => MessageKind::ProgramChange {
                channel,
                program: msg[1],
            },
            0xF0 if status == SYSEX_START => MessageKind::SystemExclusive { len: msg.len() },
            _ => MessageKind::Other,
        }
    }

    pub fn is_note_on(&self) -> bool {
        matches!(self, MessageKind::NoteOn { .. })
    }

    pub fn is_note_off(&self) -> bool {
        matches!(self, MessageKind::NoteOff { .. })
    }
}
