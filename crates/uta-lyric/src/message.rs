//! NSX-39 lyric SysEx framing.

use crate::error::{Error, Result};
use crate::phoneme::PhonemeCode;
use serde::{Deserialize, Serialize};

pub const SYSEX_START: u8 = 0xF0;
pub const SYSEX_END: u8 = 0xF7;
/// Yamaha.
pub const MANUFACTURER_ID: u8 = 0x43;
pub const DEVICE_ID: u8 = 0x79;
pub const MODEL_ID: u8 = 0x09;
pub const COMMAND: u8 = 0x11;
/// Lyric buffer write.
pub const LYRIC_SUBCOMMAND: u8 = 0x0A;

pub const HEADER: [u8; 7] = [
    SYSEX_START,
    MANUFACTURER_ID,
    DEVICE_ID,
    MODEL_ID,
    COMMAND,
    LYRIC_SUBCOMMAND,
    0x00,
];

/// Lyric buffer size of the device, in phonemes.
pub const DEFAULT_MAX_PHONEMES: usize = 64;

/// `HEADER ++ codes ++ [SYSEX_END]`, ready for one-shot transmission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct ExclusiveMessage {
    bytes: Vec<u8>,
}

impl ExclusiveMessage {
    pub fn from_codes(codes: &[PhonemeCode]) -> Self {
        let mut bytes = Vec::with_capacity(HEADER.len() + codes.len() + 1);
        bytes.extend_from_slice(&HEADER);
        bytes.extend(codes.iter().map(|c| c.value()));
        bytes.push(SYSEX_END);
        Self { bytes }
    }

    /// Validate raw bytes received from elsewhere (a capture, a config file).
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < HEADER.len() + 1 {
            return Err(Error::MalformedMessage(format!(
                "{} bytes is shorter than header and terminator",
                bytes.len()
            )));
        }
        if bytes[..HEADER.len()] != HEADER {
            return Err(Error::MalformedMessage(
                "header does not match the lyric command".to_string(),
            ));
        }
        if bytes.last() != Some(&SYSEX_END) {
            return Err(Error::MalformedMessage("missing 0xF7 terminator".to_string()));
        }
        let payload = &bytes[HEADER.len()..bytes.len() - 1];
        if let Some(&b) = payload.iter().find(|&&b| b > PhonemeCode::MAX) {
            return Err(Error::CodeOutOfRange(b));
        }
        Ok(Self { bytes })
    }

    pub fn empty() -> Self {
        Self::from_codes(&[])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The payload between header and terminator.
    pub fn phoneme_bytes(&self) -> &[u8] {
        &self.bytes[HEADER.len()..self.bytes.len() - 1]
    }

    pub fn phoneme_count(&self) -> usize {
        self.bytes.len() - HEADER.len() - 1
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Never true: header and terminator are always present.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for ExclusiveMessage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<Vec<u8>> for ExclusiveMessage {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl From<ExclusiveMessage> for Vec<u8> {
    fn from(msg: ExclusiveMessage) -> Self {
        msg.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_framing() {
        let msg = ExclusiveMessage::empty();
        assert_eq!(msg.as_bytes(), &[0xF0, 0x43, 0x79, 0x09, 0x11, 0x0A, 0x00, 0xF7]);
        assert_eq!(msg.phoneme_count(), 0);
        assert!(msg.phoneme_bytes().is_empty());
    }

    #[test]
    fn test_codes_between_header_and_terminator() {
        let codes: Vec<_> = [0u8, 1, 2]
            .into_iter()
            .map(|c| PhonemeCode::new(c).unwrap())
            .collect();
        let msg = ExclusiveMessage::from_codes(&codes);
        assert_eq!(&msg.as_bytes()[..7], &HEADER);
        assert_eq!(msg.phoneme_bytes(), &[0, 1, 2]);
        assert_eq!(*msg.as_bytes().last().unwrap(), SYSEX_END);
        assert_eq!(msg.len(), 11);
    }

    #[test]
    fn test_from_bytes_validation() {
        let good = ExclusiveMessage::from_codes(&[PhonemeCode::new(5).unwrap()]);
        assert_eq!(
            ExclusiveMessage::from_bytes(good.as_bytes().to_vec()).unwrap(),
            good
        );

        assert!(ExclusiveMessage::from_bytes(vec![0xF0, 0xF7]).is_err());

        let mut wrong_model = good.as_bytes().to_vec();
        wrong_model[3] = 0x0A;
        assert!(ExclusiveMessage::from_bytes(wrong_model).is_err());

        let mut unterminated = good.as_bytes().to_vec();
        unterminated.pop();
        unterminated.push(0x05);
        assert!(ExclusiveMessage::from_bytes(unterminated).is_err());

        let mut high_bit = good.as_bytes().to_vec();
        high_bit[7] = 0x90;
        assert_eq!(
            ExclusiveMessage::from_bytes(high_bit),
            Err(Error::CodeOutOfRange(0x90))
        );
    }
}
