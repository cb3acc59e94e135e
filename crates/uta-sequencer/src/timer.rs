//! Clocks the sequencer waits on.
//!
//! [`PreciseTimer`] is the real-time clock: it sleeps most of the way to a
//! deadline and spins the rest, since `thread::sleep` alone routinely
//! oversleeps by a millisecond or more. [`VirtualTimer`] never blocks and is
//! used to check schedules exactly in tests.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default window before a deadline in which [`PreciseTimer`] busy-waits.
pub const DEFAULT_SPIN_THRESHOLD: Duration = Duration::from_millis(2);

pub trait Timer {
    fn now(&self) -> Instant;

    /// Return no earlier than `deadline`. Returns at once if it has passed.
    fn wait_until(&mut self, deadline: Instant);
}

impl<T: Timer + ?Sized> Timer for &mut T {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn wait_until(&mut self, deadline: Instant) {
        (**self).wait_until(deadline)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PreciseTimer {
    spin_threshold: Duration,
}

impl PreciseTimer {
    pub fn new(spin_threshold: Duration) -> Self {
        Self { spin_threshold }
    }

    pub fn spin_threshold(&self) -> Duration {
        self.spin_threshold
    }
}

impl Default for PreciseTimer {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN_THRESHOLD)
    }
}

impl Timer for PreciseTimer {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wait_until(&mut self, deadline: Instant) {
        loop {
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            let remaining = deadline - now;
            if remaining > self.spin_threshold {
                std::thread::sleep(remaining - self.spin_threshold);
            } else {
                core::hint::spin_loop();
            }
        }
    }
}

#[derive(Debug)]
struct VirtualClock {
    elapsed: Duration,
    waits: Vec<Duration>,
}

/// A clock that jumps straight to each deadline.
///
/// Clones share the same clock, so a test can keep a handle to inspect
/// [`waits`](Self::waits) after moving the timer into a sequencer.
#[derive(Debug, Clone)]
pub struct VirtualTimer {
    origin: Instant,
    clock: Arc<Mutex<VirtualClock>>,
}

impl VirtualTimer {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            clock: Arc::new(Mutex::new(VirtualClock {
                elapsed: Duration::ZERO,
                waits: Vec::new(),
            })),
        }
    }

    /// Time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.clock.lock().elapsed
    }

    /// Move the clock forward without recording a wait, e.g. to simulate
    /// time lost inside a slow device call.
    pub fn advance(&self, by: Duration) {
        self.clock.lock().elapsed += by;
    }

    /// Every deadline waited on, as an offset from the clock's origin.
    pub fn waits(&self) -> Vec<Duration> {
        self.clock.lock().waits.clone()
    }
}

impl Default for VirtualTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for VirtualTimer {
    fn now(&self) -> Instant {
        self.origin + self.clock.lock().elapsed
    }

    fn wait_until(&mut self, deadline: Instant) {
        let target = deadline.saturating_duration_since(self.origin);
        let mut clock = self.clock.lock();
        clock.waits.push(target);
        if target > clock.elapsed {
            clock.elapsed = target;
        }
    }
}
