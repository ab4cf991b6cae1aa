//! Time sources
//!
//! Schedules are evaluated against a [`Clock`] so they can run on wall-clock
//! time in an app and on a fast-forwardable [`VirtualClock`] in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Milliseconds per frame at 60fps, rounded down
pub const FRAME_MS: u64 = 16;

/// A monotonic millisecond time source
pub trait Clock {
    /// Milliseconds since the clock's own origin
    fn now_ms(&self) -> u64;
}

/// Wall-clock time since the clock was created
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// A manually driven clock.
///
/// Clones share one time source, so a test can keep a handle and advance the
/// clock that a component owns.
#[derive(Clone, Debug, Default)]
pub struct VirtualClock {
    position: Arc<AtomicU64>,
}

impl VirtualClock {
    /// Create a clock at position zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at `position_ms`
    pub fn starting_at(position_ms: u64) -> Self {
        Self {
            position: Arc::new(AtomicU64::new(position_ms)),
        }
    }

    /// Move forward by `ms`
    pub fn advance(&self, ms: u64) {
        self.position.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump to `position_ms`; time never runs backwards
    pub fn seek(&self, position_ms: u64) {
        self.position.fetch_max(position_ms, Ordering::SeqCst);
    }

    /// Step forward by one frame (at 60fps)
    pub fn step_frame(&self) {
        self.advance(FRAME_MS);
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> u64 {
        self.position.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
