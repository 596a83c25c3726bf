//! Generic sampling path.
//!
//! Pins read independently through [`DigitalRead`], timed against a general
//! monotonic clock. Coarser than the bank path: up to [`GENERIC_MAX_PINS`]
//! pins at resolutions down to [`GENERIC_QUANTUM`].

use crate::buffer::SampleBuffer;
use crate::error::{Error, Result};
use crate::pin::{Clock, DigitalRead};
use crate::sampler::slot_count;
use std::sync::Arc;
use std::time::Duration;

/// Smallest resolution step for the generic path.
pub const GENERIC_QUANTUM: Duration = Duration::from_micros(10);

/// Most pins a generic capture can carry.
pub const GENERIC_MAX_PINS: usize = 2;

/// Capture the given pins at a fixed cadence against `clock`.
///
/// One independent read per pin per slot, composed into a 2-bit byte in
/// request order. A tick that arrives late but within the 1% jitter
/// tolerance still advances the schedule by one full `resolution`, so
/// borderline lateness does not accumulate; anything later fails the capture
/// with [`Error::Overrun`].
pub fn sample_pins<C: Clock + ?Sized>(
    clock: &C,
    pins: &[Arc<dyn DigitalRead>],
    resolution: Duration,
    duration: Duration,
) -> Result<SampleBuffer> {
    let slots = slot_count(resolution, duration, GENERIC_QUANTUM)?;
    if pins.len() > GENERIC_MAX_PINS {
        return Err(Error::TooManyPins {
            count: pins.len(),
            max: GENERIC_MAX_PINS,
        });
    }
    let p0: Option<&dyn DigitalRead> = pins.first().map(|p| p.as_ref());
    let p1: Option<&dyn DigitalRead> = pins.get(1).map(|p| p.as_ref());

    let mut buf = SampleBuffer::new(resolution, slots);
    let out = buf.bits_mut();
    let delta = resolution;
    let acceptable = delta / 100;
    let mut next = clock.now() + delta;
    for slot in 0..slots {
        // Busy loop: the jitter budget is below scheduler granularity.
        loop {
            let t = clock.now();
            if t == next {
                next += delta;
                break;
            }
            if t > next {
                if t > next + acceptable {
                    return Err(Error::Overrun {
                        slot,
                        excess: t - next,
                    });
                }
                // Late but tolerable: advance by a full step so the schedule
                // stays aligned to the original deadlines.
                next += delta;
                break;
            }
        }
        let mut x = 0u8;
        if let Some(p) = p0 {
            if p.read() {
                x = 1;
            }
        }
        if let Some(p) = p1 {
            if p.read() {
                x |= 2;
            }
        }
        out[slot] = x;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{HighPin, LowPin, ScriptClock, SquarePin, StepClock};

    const RES: Duration = Duration::from_micros(100);

    #[test]
    fn test_buffer_length_matches_slot_count() {
        let clock = StepClock::new(RES);
        let pins: Vec<Arc<dyn DigitalRead>> = vec![Arc::new(LowPin)];
        let buf = sample_pins(&clock, &pins, RES, RES * 25).unwrap();
        assert_eq!(buf.len(), 25);
    }

    #[test]
    fn test_two_pins_compose_in_request_order() {
        let clock = StepClock::new(RES);
        let pins: Vec<Arc<dyn DigitalRead>> = vec![Arc::new(LowPin), Arc::new(HighPin)];
        let buf = sample_pins(&clock, &pins, RES, RES * 3).unwrap();
        assert_eq!(buf.as_bytes(), &[0b10; 3]);
    }

    #[test]
    fn test_square_wave_reproduced_exactly() {
        let clock = StepClock::new(RES);
        let pins: Vec<Arc<dyn DigitalRead>> = vec![Arc::new(SquarePin::new())];
        let buf = sample_pins(&clock, &pins, RES, RES * 6).unwrap();
        assert_eq!(buf.as_bytes(), &[0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_too_many_pins() {
        let clock = StepClock::new(RES);
        let pins: Vec<Arc<dyn DigitalRead>> = vec![Arc::new(LowPin), Arc::new(LowPin), Arc::new(LowPin)];
        let err = sample_pins(&clock, &pins, RES, RES).unwrap_err();
        assert!(matches!(err, Error::TooManyPins { count: 3, max: 2 }));
    }

    #[test]
    fn test_resolution_must_be_multiple_of_quantum() {
        let clock = StepClock::new(RES);
        let pins: Vec<Arc<dyn DigitalRead>> = vec![Arc::new(LowPin)];
        let res = Duration::from_micros(15);
        let err = sample_pins(&clock, &pins, res, res * 10).unwrap_err();
        assert!(matches!(err, Error::InvalidResolution { .. }));
    }

    #[test]
    fn test_tolerable_late_tick_advances_full_step() {
        // Slot 0's tick lands 1µs late, inside the 1µs tolerance. The next
        // deadline must still be 200µs, so an exact 200µs tick is accepted.
        let us = Duration::from_micros;
        let clock = ScriptClock::new(vec![us(0), us(101), us(200), us(300)]);
        let pins: Vec<Arc<dyn DigitalRead>> = vec![Arc::new(HighPin)];
        let buf = sample_pins(&clock, &pins, RES, RES * 3).unwrap();
        assert_eq!(buf.as_bytes(), &[1, 1, 1]);
    }

    #[test]
    fn test_late_tick_beyond_tolerance_overruns() {
        let us = Duration::from_micros;
        let clock = ScriptClock::new(vec![us(0), us(100), us(202)]);
        let pins: Vec<Arc<dyn DigitalRead>> = vec![Arc::new(HighPin)];
        let err = sample_pins(&clock, &pins, RES, RES * 4).unwrap_err();
        match err {
            Error::Overrun { slot, excess } => {
                assert_eq!(slot, 1);
                assert_eq!(excess, us(2));
            }
            other => panic!("expected overrun, got {other:?}"),
        }
    }

    #[test]
    fn test_no_pins_yields_zero_bytes() {
        let clock = StepClock::new(RES);
        let buf = sample_pins(&clock, &[], RES, RES * 2).unwrap();
        assert_eq!(buf.as_bytes(), &[0, 0]);
    }
}
