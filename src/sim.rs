//! Simulated pins, banks, and clocks.
//!
//! Stand-ins for hardware when none is present. The test suite is built on
//! these, and callers can register them to exercise the full capture path on
//! a development machine.

use crate::pin::{Clock, DigitalRead, RegisterBank};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Pin that always reads high.
pub struct HighPin;

impl DigitalRead for HighPin {
    fn read(&self) -> bool {
        true
    }
}

/// Pin that always reads low.
pub struct LowPin;

impl DigitalRead for LowPin {
    fn read(&self) -> bool {
        false
    }
}

/// Pin that alternates level on every read, starting low.
#[derive(Default)]
pub struct SquarePin {
    state: AtomicBool,
}

impl SquarePin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DigitalRead for SquarePin {
    fn read(&self) -> bool {
        self.state.fetch_xor(true, Ordering::Relaxed)
    }
}

/// Register bank over an atomic word, with a pluggable clock.
pub struct SimBank<C> {
    word: AtomicU32,
    toggle: u32,
    clock: C,
}

impl<C: Clock> SimBank<C> {
    pub fn new(word: u32, clock: C) -> Self {
        Self {
            word: AtomicU32::new(word),
            toggle: 0,
            clock,
        }
    }

    /// Bits in `toggle` flip after every bank read, producing square waves on
    /// those bank bits.
    pub fn with_toggle(word: u32, toggle: u32, clock: C) -> Self {
        Self {
            word: AtomicU32::new(word),
            toggle,
            clock,
        }
    }

    pub fn set_word(&self, word: u32) {
        self.word.store(word, Ordering::Relaxed);
    }
}

impl<C: Clock> RegisterBank for SimBank<C> {
    fn read_bank(&self) -> u32 {
        // Returns the pre-toggle word, so the first read sees the initial state.
        self.word.fetch_xor(self.toggle, Ordering::Relaxed)
    }

    fn now(&self) -> Duration {
        self.clock.now()
    }
}

/// Clock that advances a fixed step on every `now` call.
pub struct StepClock {
    nanos: AtomicU64,
    step: u64,
}

impl StepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            nanos: AtomicU64::new(0),
            step: step.as_nanos() as u64,
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.fetch_add(self.step, Ordering::Relaxed) + self.step)
    }
}

/// Clock that replays a fixed timestamp sequence, holding the final entry
/// once exhausted.
pub struct ScriptClock {
    times: Vec<Duration>,
    cursor: AtomicUsize,
}

impl ScriptClock {
    /// Panics if `times` is empty.
    pub fn new(times: Vec<Duration>) -> Self {
        assert!(!times.is_empty(), "ScriptClock needs at least one timestamp");
        Self {
            times,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl Clock for ScriptClock {
    fn now(&self) -> Duration {
        let i = self
            .cursor
            .fetch_add(1, Ordering::Relaxed)
            .min(self.times.len() - 1);
        self.times[i]
    }
}
