//! Add-noise record: perturbs two sample waveforms in place.

use uc_convert::{NoiseSource, add_noise_pair};

use crate::error::HostResult;

/// Fields of an add-noise record.
///
/// `a` and `b` are sample waveforms, `noise_level` is in thousandths of the sample
/// unit and `count` is the number of valid elements in each waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseRecord {
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub noise_level: f64,
    pub count: usize,
}

impl NoiseRecord {
    pub fn new(a: Vec<f64>, b: Vec<f64>, noise_level: f64) -> Self {
        let count = a.len().min(b.len());
        Self {
            a,
            b,
            noise_level,
            count,
        }
    }

    pub fn process(&mut self, noise: &mut impl NoiseSource) -> HostResult<()> {
        add_noise_pair(&mut self.a, &mut self.b, self.count, self.noise_level, noise)?;
        Ok(())
    }
}
