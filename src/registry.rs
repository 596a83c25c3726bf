//! Pin registry: an explicit, clonable handle mapping names to live pins.
//!
//! Passed into the [`crate::Sampler`] at construction instead of living as
//! process-wide state, so callers (and tests) control exactly which pins a
//! capture can see.

use crate::pin::{DigitalRead, RegisterBank};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Registry of named pins plus an optional register bank.
///
/// Cheap to clone; clones share the same underlying maps.
#[derive(Clone, Default)]
pub struct PinRegistry {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    pins: DashMap<String, Arc<dyn DigitalRead>>,
    bank: RwLock<Option<Arc<dyn RegisterBank>>>,
}

impl PinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pin under `name`, replacing any previous entry.
    pub fn register(&self, name: impl Into<String>, pin: Arc<dyn DigitalRead>) {
        let name = name.into();
        tracing::debug!("registered pin {}", name);
        self.inner.pins.insert(name, pin);
    }

    /// Look up a pin by name.
    pub fn by_name(&self, name: &str) -> Option<Arc<dyn DigitalRead>> {
        self.inner.pins.get(name).map(|p| Arc::clone(&p))
    }

    /// Names of all registered pins, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.pins.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// One immediate read of every registered pin, sorted by name.
    pub fn snapshot(&self) -> Vec<(String, bool)> {
        let mut levels: Vec<(String, bool)> = self
            .inner
            .pins
            .iter()
            .map(|e| (e.key().clone(), e.value().read()))
            .collect();
        levels.sort_by(|a, b| a.0.cmp(&b.0));
        levels
    }

    /// Install the register bank that enables the fast sampling path.
    pub fn set_bank(&self, bank: Arc<dyn RegisterBank>) {
        tracing::debug!("register bank installed");
        *self.inner.bank.write() = Some(bank);
    }

    pub fn bank(&self) -> Option<Arc<dyn RegisterBank>> {
        self.inner.bank.read().clone()
    }
}
