//! Named numeric slots of a host record.

use std::collections::BTreeMap;

use crate::error::{HostError, HostResult};

/// Field access on a host record.
///
/// Implemented by the host integration; [`SlotMap`] is an in-memory implementation.
pub trait RecordSlots {
    /// Current value of `slot`, `None` if the record has no such slot.
    fn read(&self, slot: &str) -> Option<f64>;

    /// Whether a `write` to `slot` would be accepted.
    fn writable(&self, slot: &str) -> bool;

    fn write(&mut self, slot: &str, value: f64) -> HostResult<()>;
}

/// In-memory record with freely named slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotMap {
    values: BTreeMap<String, f64>,
    read_only: Vec<String>,
}

impl SlotMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style slot assignment.
    pub fn with(mut self, slot: impl Into<String>, value: f64) -> Self {
        self.values.insert(slot.into(), value);
        self
    }

    /// Mark `slot` as input-only; writes to it fail.
    pub fn read_only(mut self, slot: impl Into<String>) -> Self {
        self.read_only.push(slot.into());
        self
    }

    pub fn get(&self, slot: &str) -> Option<f64> {
        self.values.get(slot).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl RecordSlots for SlotMap {
    fn read(&self, slot: &str) -> Option<f64> {
        self.get(slot)
    }

    fn writable(&self, slot: &str) -> bool {
        !self.read_only.iter().any(|s| s == slot)
    }

    fn write(&mut self, slot: &str, value: f64) -> HostResult<()> {
        if !self.writable(slot) {
            return Err(HostError::ReadOnlySlot {
                slot: slot.to_string(),
            });
        }
        self.values.insert(slot.to_string(), value);
        Ok(())
    }
}
