//! Records keyed by identifier, driven through the host's init/process hooks.

use std::collections::HashMap;

use tracing::debug;
use uc_convert::{ConverterConfig, UniformNoise};

use crate::error::{HostError, HostResult};
use crate::record::{ConversionBinding, ConversionRecord};
use crate::slots::RecordSlots;

/// All conversion records of one host application.
///
/// Owns the noise generator used by every record, seeded from the configuration.
#[derive(Debug)]
pub struct RecordRegistry {
    config: ConverterConfig,
    records: HashMap<String, ConversionRecord>,
    noise: UniformNoise,
}

impl RecordRegistry {
    pub fn new(config: ConverterConfig) -> Self {
        let noise = UniformNoise::from_seed_option(config.noise_seed);
        Self {
            config,
            records: HashMap::new(),
            noise,
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Init hook. Each identifier may be initialized once.
    pub fn init(
        &mut self,
        identifier: &str,
        binding: ConversionBinding,
    ) -> HostResult<&ConversionRecord> {
        if self.records.contains_key(identifier) {
            return Err(HostError::DuplicateRecord {
                identifier: identifier.to_string(),
            });
        }
        let record = ConversionRecord::init(identifier, binding, &self.config)?;
        debug!(
            identifier,
            has_table = record.converter().has_table(),
            arity = record.arity().count(),
            "record initialized"
        );
        Ok(self
            .records
            .entry(identifier.to_string())
            .or_insert(record))
    }

    /// Process hook.
    pub fn process(&mut self, identifier: &str, slots: &mut impl RecordSlots) -> HostResult<()> {
        let record = self
            .records
            .get(identifier)
            .ok_or_else(|| HostError::UnknownRecord {
                identifier: identifier.to_string(),
            })?;
        record.process(slots, &mut self.noise)
    }

    pub fn get(&self, identifier: &str) -> Option<&ConversionRecord> {
        self.records.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}
