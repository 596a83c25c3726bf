//! Bit-packed capture output.

use std::time::Duration;

/// A completed capture: one byte per time slot, bit *i* holding the level of
/// the *i*-th requested pin (0 = low, 1 = high). Bits beyond the pin count
/// are zero.
///
/// The buffer is allocated in full before the timing loop starts and is only
/// handed out once every slot has been written; callers never observe a
/// partial capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    resolution: Duration,
    bits: Vec<u8>,
}

impl SampleBuffer {
    pub(crate) fn new(resolution: Duration, slots: usize) -> Self {
        Self {
            resolution,
            bits: vec![0; slots],
        }
    }

    /// Sampling cadence this buffer was captured at.
    pub fn resolution(&self) -> Duration {
        self.resolution
    }

    /// Number of slots captured.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Raw slot bytes, in capture order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    /// Level of the pin at request index `pin` during `slot`.
    ///
    /// Panics if `slot` is out of range.
    pub fn level(&self, slot: usize, pin: usize) -> bool {
        (self.bits[slot] >> pin) & 1 == 1
    }

    pub(crate) fn bits_mut(&mut self) -> &mut [u8] {
        &mut self.bits
    }
}
