//! Conversion records: a converter plus the slots it reads and writes.

use serde::{Deserialize, Serialize};
use uc_convert::{ConverterConfig, Direction, NoiseSource, UnitConverter};

use crate::error::{HostError, HostResult};
use crate::slots::RecordSlots;

/// Number of independent value pairs a record converts per process call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    One,
    Two,
    Three,
}

impl Arity {
    pub fn count(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<usize> for Arity {
    type Error = HostError;

    fn try_from(pairs: usize) -> HostResult<Self> {
        match pairs {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            _ => Err(HostError::InvalidArity { pairs }),
        }
    }
}

/// One input slot converted into one output slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPair {
    pub input: String,
    pub output: String,
}

impl SlotPair {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Which slots a record converts, in which direction, with optional noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionBinding {
    pub direction: Direction,
    pub pairs: Vec<SlotPair>,
    /// Amplitude of uniform noise added to every converted value.
    #[serde(default)]
    pub noise_amplitude: Option<f64>,
}

/// Conventional slot layout: `A -> B`, `C -> D`, `E -> F`.
const STANDARD_PAIRS: [(&str, &str); 3] = [("A", "B"), ("C", "D"), ("E", "F")];

impl ConversionBinding {
    pub fn standard(arity: Arity, direction: Direction) -> Self {
        Self {
            direction,
            pairs: STANDARD_PAIRS[..arity.count()]
                .iter()
                .map(|&(i, o)| SlotPair::new(i, o))
                .collect(),
            noise_amplitude: None,
        }
    }

    pub fn with_noise(mut self, amplitude: f64) -> Self {
        self.noise_amplitude = Some(amplitude);
        self
    }

    pub fn arity(&self) -> HostResult<Arity> {
        Arity::try_from(self.pairs.len())
    }
}

/// A record initialized by the host: its converter is fixed for its lifetime.
#[derive(Debug, Clone)]
pub struct ConversionRecord {
    identifier: String,
    converter: UnitConverter,
    binding: ConversionBinding,
    arity: Arity,
}

impl ConversionRecord {
    /// Host `init` hook: build the converter for `identifier`.
    pub fn init(
        identifier: &str,
        binding: ConversionBinding,
        config: &ConverterConfig,
    ) -> HostResult<Self> {
        let arity = binding.arity()?;
        Ok(Self::with_converter(
            identifier,
            UnitConverter::from_identifier(identifier, config),
            binding,
            arity,
        ))
    }

    pub(crate) fn with_converter(
        identifier: &str,
        converter: UnitConverter,
        binding: ConversionBinding,
        arity: Arity,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            converter,
            binding,
            arity,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn converter(&self) -> &UnitConverter {
        &self.converter
    }

    pub fn binding(&self) -> &ConversionBinding {
        &self.binding
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Host `process` hook: convert every bound input into its output slot.
    ///
    /// All inputs are read and every output is checked for writability before
    /// anything is written, so a failed call leaves the record untouched.
    pub fn process(
        &self,
        slots: &mut impl RecordSlots,
        noise: &mut impl NoiseSource,
    ) -> HostResult<()> {
        let inputs = self
            .binding
            .pairs
            .iter()
            .map(|pair| {
                slots.read(&pair.input).ok_or_else(|| HostError::MissingSlot {
                    slot: pair.input.clone(),
                })
            })
            .collect::<HostResult<Vec<f64>>>()?;

        if let Some(pair) = self.binding.pairs.iter().find(|p| !slots.writable(&p.output)) {
            return Err(HostError::ReadOnlySlot {
                slot: pair.output.clone(),
            });
        }

        let direction = self.binding.direction;
        for (pair, value) in self.binding.pairs.iter().zip(inputs) {
            let converted = match self.binding.noise_amplitude {
                Some(amplitude) => {
                    self.converter
                        .convert_with_noise(value, direction, amplitude, noise)
                }
                None => self.converter.convert(value, direction),
            };
            slots.write(&pair.output, converted)?;
        }
        Ok(())
    }
}
