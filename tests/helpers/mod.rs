//! Test helpers and fixtures for uta integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `NOTE_TIMING_EPSILON` (10 ms): spacing between consecutive note-ons
//! - `PERFORMANCE_EPSILON` (20 ms): total length of a performance

#![allow(dead_code)]

pub mod tolerances;

use uta::prelude::*;
use uta::MessageKind;

/// Channel every test singer sends on.
pub const TEST_CHANNEL: u8 = 0;

/// Singer over a capture session and a virtual clock: no hardware, no
/// waiting. Returns an observer handle sharing the capture log.
pub fn virtual_singer() -> (Singer<CaptureSession, VirtualTimer>, CaptureSession) {
    virtual_singer_with(SingerConfig::default())
}

pub fn virtual_singer_with(
    config: SingerConfig,
) -> (Singer<CaptureSession, VirtualTimer>, CaptureSession) {
    let capture = CaptureSession::new(TEST_CHANNEL);
    let singer = Singer::with_timer(capture.clone(), config, VirtualTimer::new())
        .expect("Failed to create test singer");
    (singer, capture)
}

/// Singer over a capture session with the real-time timer.
pub fn realtime_singer() -> (Singer<CaptureSession>, CaptureSession) {
    let capture = CaptureSession::new(TEST_CHANNEL);
    let singer = Singer::with_session(capture.clone(), SingerConfig::default())
        .expect("Failed to create test singer");
    (singer, capture)
}

pub fn note_on(note: u8, velocity: u8) -> MessageKind {
    MessageKind::NoteOn {
        channel: TEST_CHANNEL,
        note,
        velocity,
    }
}

pub fn note_off(note: u8, velocity: u8) -> MessageKind {
    MessageKind::NoteOff {
        channel: TEST_CHANNEL,
        note,
        velocity,
    }
}

pub fn program(program: u8) -> MessageKind {
    MessageKind::ProgramChange {
        channel: TEST_CHANNEL,
        program,
    }
}
