//! Tolerance constants for timing tests.
//!
//! Wall-clock tests run on shared CI machines, so these are loose compared
//! with what the precise timer achieves on an idle system.

/// Allowed deviation of one note-on gap from the preceding hold, in seconds.
pub const NOTE_TIMING_EPSILON: f64 = 0.010;

/// Allowed deviation of a whole performance from its nominal length, in seconds.
pub const PERFORMANCE_EPSILON: f64 = 0.020;
