//! Capture entry point: validation, mode selection, dedicated capture thread.

mod bank;
mod generic;

pub use bank::{sample_bank, BANK_MAX_PINS, BANK_QUANTUM};
pub use generic::{sample_pins, GENERIC_MAX_PINS, GENERIC_QUANTUM};

use crate::buffer::SampleBuffer;
use crate::error::{Error, Result};
use crate::pin::{DigitalRead, RegisterBank, SystemClock};
use crate::registry::PinRegistry;
use crate::request::CaptureRequest;
use smallvec::SmallVec;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thread_priority::ThreadPriority;

/// Shared cadence validation. Both paths call this before touching hardware
/// or allocating the output buffer.
pub(crate) fn slot_count(
    resolution: Duration,
    duration: Duration,
    quantum: Duration,
) -> Result<usize> {
    if resolution.is_zero() || resolution.as_nanos() % quantum.as_nanos() != 0 {
        return Err(Error::InvalidResolution { resolution, quantum });
    }
    if duration.is_zero() || duration.as_nanos() % resolution.as_nanos() != 0 {
        return Err(Error::InvalidDuration {
            duration,
            resolution,
        });
    }
    Ok((duration.as_nanos() / resolution.as_nanos()) as usize)
}

/// All-or-nothing mapping of request names onto bank bit positions. Any name
/// outside the bank's convention sends the whole request down the generic
/// path.
fn bank_bits(bank: &dyn RegisterBank, pins: &[&str]) -> Option<SmallVec<[u8; BANK_MAX_PINS]>> {
    pins.iter().map(|name| bank.pin_bit(name)).collect()
}

/// Drives sampling passes against a [`PinRegistry`].
///
/// Requests targeting overlapping pins must be serialized by the caller; the
/// sampler does not coordinate across concurrent calls.
#[derive(Clone)]
pub struct Sampler {
    registry: PinRegistry,
}

impl Sampler {
    pub fn new(registry: PinRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    /// Run a sampling pass on the calling thread.
    ///
    /// Blocks for roughly `duration`. Validation happens up front; once the
    /// timing loop starts the only possible failure is [`Error::Overrun`].
    pub fn sample(
        &self,
        pins: &[&str],
        resolution: Duration,
        duration: Duration,
    ) -> Result<SampleBuffer> {
        let result = self.sample_inner(pins, resolution, duration);
        if let Err(Error::Overrun { slot, excess }) = &result {
            tracing::warn!("capture overrun by {:?} at slot {}", excess, slot);
        }
        result
    }

    fn sample_inner(
        &self,
        pins: &[&str],
        resolution: Duration,
        duration: Duration,
    ) -> Result<SampleBuffer> {
        if let Some(bank) = self.registry.bank() {
            if let Some(bits) = bank_bits(bank.as_ref(), pins) {
                tracing::debug!("bank capture: {} pins at {:?}", pins.len(), resolution);
                return sample_bank(bank.as_ref(), &bits, resolution, duration);
            }
        }

        if pins.len() > GENERIC_MAX_PINS {
            return Err(Error::TooManyPins {
                count: pins.len(),
                max: GENERIC_MAX_PINS,
            });
        }
        let mut resolved: SmallVec<[Arc<dyn DigitalRead>; GENERIC_MAX_PINS]> = SmallVec::new();
        for name in pins {
            let pin = self
                .registry
                .by_name(name)
                .ok_or_else(|| Error::PinUnavailable((*name).to_string()))?;
            resolved.push(pin);
        }
        tracing::debug!("generic capture: {} pins at {:?}", pins.len(), resolution);
        sample_pins(&SystemClock::new(), &resolved, resolution, duration)
    }

    /// Run a sampling pass on a dedicated maximum-priority thread.
    ///
    /// The pass owns its thread for the whole capture, keeping the busy-poll
    /// loop away from unrelated work on the caller's thread. Blocks until the
    /// capture completes or fails; not cancelable once started.
    pub fn capture(
        &self,
        pins: &[&str],
        resolution: Duration,
        duration: Duration,
    ) -> Result<SampleBuffer> {
        let sampler = self.clone();
        let names: Vec<String> = pins.iter().map(|s| s.to_string()).collect();
        let handle = thread::Builder::new()
            .name("pinscope-capture".into())
            .spawn(move || {
                let _ = thread_priority::set_current_thread_priority(ThreadPriority::Max);
                let pins: Vec<&str> = names.iter().map(String::as_str).collect();
                sampler.sample(&pins, resolution, duration)
            })?;
        handle.join().map_err(|_| Error::CaptureThread)?
    }

    /// [`Sampler::capture`] over a request-boundary value.
    pub fn run(&self, request: &CaptureRequest) -> Result<SampleBuffer> {
        let pins: Vec<&str> = request.pins.iter().map(String::as_str).collect();
        self.capture(&pins, request.resolution, request.duration)
    }
}
