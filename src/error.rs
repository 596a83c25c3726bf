//! Error types.

use std::time::Duration;
use thiserror::Error;

/// Error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Resolution is zero or not a multiple of the active mode's quantum.
    #[error("invalid resolution {resolution:?}: must be a positive multiple of {quantum:?}")]
    InvalidResolution {
        resolution: Duration,
        quantum: Duration,
    },

    /// Duration is zero or not a multiple of the resolution.
    #[error("invalid duration {duration:?}: must be a positive multiple of the resolution {resolution:?}")]
    InvalidDuration {
        duration: Duration,
        resolution: Duration,
    },

    /// The request exceeds the active mode's simultaneous pin limit.
    #[error("{count} pins requested, at most {max} can be read simultaneously")]
    TooManyPins { count: usize, max: usize },

    /// A requested pin does not resolve to a live, readable pin.
    #[error("pin unavailable: {0}")]
    PinUnavailable(String),

    /// A slot's capture time exceeded its deadline plus the jitter tolerance.
    ///
    /// Fatal to the capture: a missed deadline invalidates the cadence of
    /// every remaining slot, so no partial buffer is returned.
    #[error("overrun by {excess:?} at slot {slot}")]
    Overrun { slot: usize, excess: Duration },

    /// The dedicated capture thread panicked.
    #[error("capture thread panicked")]
    CaptureThread,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;
