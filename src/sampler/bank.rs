//! Register-bank sampling path.
//!
//! When every requested pin lives in one 32-bit bank, each slot is a single
//! word read timed against the bank's own clock. This supports up to
//! [`BANK_MAX_PINS`] pins at resolutions down to [`BANK_QUANTUM`].

use crate::buffer::SampleBuffer;
use crate::error::{Error, Result};
use crate::pin::RegisterBank;
use crate::sampler::slot_count;
use std::time::Duration;

/// Smallest resolution step for the register-bank path.
pub const BANK_QUANTUM: Duration = Duration::from_micros(1);

/// Most pins a single bank capture can carry.
pub const BANK_MAX_PINS: usize = 8;

/// Capture the given bank bits at a fixed cadence.
///
/// `bits[i]` is the bank bit position of the *i*-th requested pin; its level
/// lands in bit *i* of each output byte. `duration / resolution` slots are
/// captured, each within 1% of `resolution` of its deadline, or the whole
/// capture fails with [`Error::Overrun`].
pub fn sample_bank<B: RegisterBank + ?Sized>(
    bank: &B,
    bits: &[u8],
    resolution: Duration,
    duration: Duration,
) -> Result<SampleBuffer> {
    let slots = slot_count(resolution, duration, BANK_QUANTUM)?;
    if bits.len() > BANK_MAX_PINS {
        return Err(Error::TooManyPins {
            count: bits.len(),
            max: BANK_MAX_PINS,
        });
    }

    // For the i-th pin at bank bit p, a single masked rotation lands its
    // level directly in output bit i, so the eight extractions OR together
    // without further rearrangement. Unused lanes have a zero mask.
    let mut masks = [0u32; BANK_MAX_PINS];
    let mut rots = [0u32; BANK_MAX_PINS];
    for (i, &p) in bits.iter().enumerate() {
        if p > 31 {
            return Err(Error::PinUnavailable(format!(
                "bank bit {p} out of range [0, 31]"
            )));
        }
        masks[i] = 1 << p;
        rots[i] = (p as u32).wrapping_sub(i as u32) & 31;
    }

    let mut buf = SampleBuffer::new(resolution, slots);
    let out = buf.bits_mut();
    let delta = resolution;
    let acceptable = delta / 100;
    let mut next = bank.now() + delta;
    for slot in 0..slots {
        // Busy loop: the jitter budget is below scheduler granularity.
        loop {
            let t = bank.now();
            if t >= next && t <= next + acceptable {
                next += delta;
                break;
            }
            if t > next {
                // Behind schedule with no way to catch up; advancing the
                // deadline would corrupt the cadence of every later slot.
                return Err(Error::Overrun {
                    slot,
                    excess: t - next,
                });
            }
        }
        // One bank read per slot. Everything below runs inside the jitter
        // window: no calls, no allocation, no branches on pin count.
        let v = bank.read_bank();
        let mut x = (v & masks[0]).rotate_right(rots[0]);
        x |= (v & masks[1]).rotate_right(rots[1]);
        x |= (v & masks[2]).rotate_right(rots[2]);
        x |= (v & masks[3]).rotate_right(rots[3]);
        x |= (v & masks[4]).rotate_right(rots[4]);
        x |= (v & masks[5]).rotate_right(rots[5]);
        x |= (v & masks[6]).rotate_right(rots[6]);
        x |= (v & masks[7]).rotate_right(rots[7]);
        out[slot] = x as u8;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ScriptClock, SimBank, StepClock};

    const RES: Duration = Duration::from_micros(100);

    fn bank_with_word(word: u32) -> SimBank<StepClock> {
        SimBank::new(word, StepClock::new(RES))
    }

    #[test]
    fn test_buffer_length_matches_slot_count() {
        let bank = bank_with_word(0);
        let buf = sample_bank(&bank, &[0], RES, RES * 50).unwrap();
        assert_eq!(buf.len(), 50);
    }

    #[test]
    fn test_levels_land_in_request_order() {
        // Pins at bank bits 5, 3, 1 with bits 5 and 1 high: request order
        // [5, 3, 1] must pack as 0b101.
        let bank = bank_with_word((1 << 5) | (1 << 1));
        let buf = sample_bank(&bank, &[5, 3, 1], RES, RES * 4).unwrap();
        assert_eq!(buf.as_bytes(), &[0b101; 4]);
    }

    #[test]
    fn test_low_bank_bit_at_high_request_index() {
        // Bank bit 0 requested at index 3 needs a left rotation to land in
        // output bit 3.
        let bank = bank_with_word(0b1);
        let buf = sample_bank(&bank, &[4, 3, 2, 0], RES, RES * 2).unwrap();
        assert_eq!(buf.as_bytes(), &[0b1000; 2]);
    }

    #[test]
    fn test_square_wave_reproduced_exactly() {
        let bank = SimBank::with_toggle(0, 0b1, StepClock::new(RES));
        let buf = sample_bank(&bank, &[0], RES, RES * 6).unwrap();
        assert_eq!(buf.as_bytes(), &[0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_too_many_pins() {
        let bank = bank_with_word(0);
        let err = sample_bank(&bank, &[0, 1, 2, 3, 4, 5, 6, 7, 8], RES, RES).unwrap_err();
        assert!(matches!(err, Error::TooManyPins { count: 9, max: 8 }));
    }

    #[test]
    fn test_bank_bit_out_of_range() {
        let bank = bank_with_word(0);
        let err = sample_bank(&bank, &[32], RES, RES).unwrap_err();
        assert!(matches!(err, Error::PinUnavailable(_)));
    }

    #[test]
    fn test_resolution_must_be_multiple_of_quantum() {
        let bank = bank_with_word(0);
        let res = Duration::from_nanos(1500);
        let err = sample_bank(&bank, &[0], res, res * 10).unwrap_err();
        assert!(matches!(err, Error::InvalidResolution { .. }));
    }

    #[test]
    fn test_late_tick_beyond_tolerance_overruns() {
        // Slots 0 and 1 hit their deadlines exactly; slot 2's first tick
        // arrives 11µs past a 1µs tolerance window.
        let us = Duration::from_micros;
        let clock = ScriptClock::new(vec![us(0), us(100), us(200), us(311)]);
        let bank = SimBank::new(0, clock);
        let err = sample_bank(&bank, &[0], RES, RES * 5).unwrap_err();
        match err {
            Error::Overrun { slot, excess } => {
                assert_eq!(slot, 2);
                assert_eq!(excess, us(11));
            }
            other => panic!("expected overrun, got {other:?}"),
        }
    }

    #[test]
    fn test_tick_at_tolerance_edge_is_accepted() {
        // Slot deadlines at 100µs steps with a 1µs tolerance; every tick
        // lands exactly on the edge of its window.
        let us = Duration::from_micros;
        let clock = ScriptClock::new(vec![us(0), us(101), us(201), us(301)]);
        let bank = SimBank::new(0, clock);
        let buf = sample_bank(&bank, &[0], RES, RES * 3).unwrap();
        assert_eq!(buf.len(), 3);
    }
}
