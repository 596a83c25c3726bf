//! Request boundary type.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One sampling request, as handed over by an external caller such as an
/// HTTP handler.
///
/// Pin order is significant: the pin at index *i* occupies bit *i* of every
/// output byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub pins: Vec<String>,
    pub resolution: Duration,
    pub duration: Duration,
}
