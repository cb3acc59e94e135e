//! In-memory session that records outgoing messages.
//!
//! Used for dry runs and tests. Clones share the same log, so a test can keep
//! one handle while another is moved into the code under test.

use crate::error::{Error, Result};
use crate::message::{MessageKind, MidiOutputMessage};
use crate::session::DeviceSession;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedMessage {
    pub at: Instant,
    pub message: MidiOutputMessage,
}

impl CapturedMessage {
    pub fn kind(&self) -> MessageKind {
        self.message.kind()
    }
}

#[derive(Debug, Default)]
struct CaptureLog {
    messages: Vec<CapturedMessage>,
    /// Fail every send once this many messages have been accepted.
    fail_after: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct CaptureSession {
    channel: u8,
    log: Arc<Mutex<CaptureLog>>,
}

impl CaptureSession {
    pub fn new(channel: u8) -> Self {
        Self {
            channel: channel.min(15),
            log: Arc::default(),
        }
    }

    /// Accept `count` messages, then fail every send with
    /// [`Error::MidiSend`]. Simulates a device unplugged mid-performance.
    pub fn failing_after(self, count: usize) -> Self {
        self.log.lock().fail_after = Some(count);
        self
    }

    pub fn messages(&self) -> Vec<CapturedMessage> {
        self.log.lock().messages.clone()
    }

    pub fn kinds(&self) -> Vec<MessageKind> {
        self.log.lock().messages.iter().map(|m| m.kind()).collect()
    }

    /// Instants of every note-on, in send order.
    pub fn note_on_times(&self) -> Vec<Instant> {
        self.log
            .lock()
            .messages
            .iter()
            .filter(|m| m.kind().is_note_on())
            .map(|m| m.at)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.log.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().messages.is_empty()
    }

    pub fn clear(&self) {
        self.log.lock().messages.clear();
    }
}

impl DeviceSession for CaptureSession {
    fn channel(&self) -> u8 {
        self.channel
    }

    fn send_message(&mut self, message: MidiOutputMessage) -> Result<()> {
        let mut log = self.log.lock();
        if log.fail_after.is_some_and(|limit| log.messages.len() >= limit) {
            return Err(Error::MidiSend("capture session closed".to_string()));
        }
        log.messages.push(CapturedMessage {
            at: Instant::now(),
            message,
        });
        Ok(())
    }
}
