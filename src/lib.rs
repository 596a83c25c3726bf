//! Real-time digital pin sampling.
//!
//! Given an ordered set of digital input pins, a resolution, and a duration,
//! the sampler produces a time-ordered, bit-packed trace of each pin's logic
//! level, captured at a fixed cadence with a jitter tolerance of 1% of the
//! resolution.
//!
//! Two paths are selected per request:
//!
//! - **Register bank**: all pins live in one 32-bit bank read as a single
//!   word, up to 8 pins at resolutions down to 1µs.
//! - **Generic**: pins read independently, up to 2 pins at resolutions down
//!   to 10µs.
//!
//! # Example
//!
//! ```
//! use pinscope::{PinRegistry, Sampler};
//! use pinscope::sim::{SimBank, StepClock};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let res = Duration::from_micros(100);
//! let registry = PinRegistry::new();
//! registry.set_bank(Arc::new(SimBank::new(0b10, StepClock::new(res))));
//!
//! let sampler = Sampler::new(registry);
//! let trace = sampler.sample(&["GPIO1"], res, Duration::from_millis(1))?;
//! assert_eq!(trace.len(), 10);
//! assert!(trace.level(0, 0));
//! # Ok::<(), pinscope::Error>(())
//! ```

// Error types
pub mod error;
pub use error::{Error, Result};

// Capture output
mod buffer;
pub use buffer::SampleBuffer;

// Hardware seams
pub mod pin;
pub use pin::{Clock, DigitalRead, RegisterBank, SystemClock};

// Pin registry handle
mod registry;
pub use registry::PinRegistry;

// Request boundary
mod request;
pub use request::CaptureRequest;

// Sampling engine
pub mod sampler;
pub use sampler::{Sampler, BANK_MAX_PINS, BANK_QUANTUM, GENERIC_MAX_PINS, GENERIC_QUANTUM};

// Simulated hardware
pub mod sim;
