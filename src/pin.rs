//! Pin and clock abstractions.
//!
//! Hardware access is injected through these traits; the sampler never touches
//! process-wide state. Chip-specific HALs implement them, and [`crate::sim`]
//! provides simulated stand-ins.

use std::time::{Duration, Instant};

/// A single digital input pin.
pub trait DigitalRead: Send + Sync {
    /// Current logic level, `true` is high.
    fn read(&self) -> bool;
}

/// Monotonic time source for the generic sampling path.
pub trait Clock: Send + Sync {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall-clock backed [`Clock`], anchored at construction.
#[derive(Debug, Clone, Copy)]
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
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A hardware block exposing up to 32 pins as one readable word, together
/// with the hardware's own high-resolution monotonic clock.
///
/// A bank registered on a [`crate::PinRegistry`] enables the fast sampling
/// path for requests whose pins all follow the bank's naming convention.
pub trait RegisterBank: Send + Sync {
    /// Snapshot of bits 0-31 in a single read.
    ///
    /// Called once per slot inside the busy-poll window; implementations must
    /// not allocate, lock, or block.
    fn read_bank(&self) -> u32;

    /// High-resolution monotonic time.
    fn now(&self) -> Duration;

    /// Bit position of a pin name that follows the bank's naming convention.
    ///
    /// The default parses `GPIO<n>`. Returning `None` for any requested name
    /// sends the whole request down the generic path.
    fn pin_bit(&self, name: &str) -> Option<u8> {
        name.strip_prefix("GPIO")?.parse().ok()
    }
}
