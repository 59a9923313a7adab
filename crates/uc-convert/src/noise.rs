//! Bounded additive noise.
//!
//! Samples come from a [`NoiseSource`]. [`UniformNoise`] is an owned PCG32 generator
//! that can be seeded for reproducible runs; [`SharedNoise`] is a handle to one
//! process-wide generator guarded by a mutex, for callers that do not carry their own.

use std::sync::{Mutex, OnceLock, PoisonError};

use rand_core::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::{ConvertError, ConvertResult};

/// Noise levels are expressed in thousandths of the sample unit.
pub const NOISE_SCALE: f64 = 1e-3;

/// Source of uniformly distributed samples in `[-1, 1]`.
pub trait NoiseSource {
    fn uniform_sample(&mut self) -> f64;
}

impl<T: NoiseSource + ?Sized> NoiseSource for &mut T {
    fn uniform_sample(&mut self) -> f64 {
        (**self).uniform_sample()
    }
}

/// Owned uniform generator.
#[derive(Debug, Clone)]
pub struct UniformNoise {
    rng: Pcg32,
}

impl UniformNoise {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg32::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl NoiseSource for UniformNoise {
    fn uniform_sample(&mut self) -> f64 {
        2.0 * (f64::from(self.rng.next_u32()) / f64::from(u32::MAX)) - 1.0
    }
}

static GLOBAL_NOISE: OnceLock<Mutex<UniformNoise>> = OnceLock::new();

fn global() -> &'static Mutex<UniformNoise> {
    GLOBAL_NOISE.get_or_init(|| Mutex::new(UniformNoise::from_entropy()))
}

/// Handle to the process-wide generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedNoise;

impl SharedNoise {
    pub fn global() -> Self {
        Self
    }

    /// Replace the process-wide generator with a seeded one.
    pub fn reseed(seed: u64) {
        *global().lock().unwrap_or_else(PoisonError::into_inner) = UniformNoise::seeded(seed);
    }
}

impl NoiseSource for SharedNoise {
    fn uniform_sample(&mut self) -> f64 {
        global()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .uniform_sample()
    }
}

/// `sample` perturbed by at most `level * NOISE_SCALE`.
pub fn add_noise(sample: f64, level: f64, noise: &mut impl NoiseSource) -> f64 {
    sample + noise.uniform_sample() * level * NOISE_SCALE
}

pub fn add_noise_slice(samples: &mut [f64], level: f64, noise: &mut impl NoiseSource) {
    for s in samples {
        *s = add_noise(*s, level, noise);
    }
}

/// Perturb the first `count` elements of two sequences, element by element.
pub fn add_noise_pair(
    a: &mut [f64],
    b: &mut [f64],
    count: usize,
    level: f64,
    noise: &mut impl NoiseSource,
) -> ConvertResult<()> {
    if a.len() < count {
        return Err(ConvertError::LengthMismatch {
            what: "first sequence",
            len: a.len(),
            count,
        });
    }
    if b.len() < count {
        return Err(ConvertError::LengthMismatch {
            what: "second sequence",
            len: b.len(),
            count,
        });
    }
    for (x, y) in a[..count].iter_mut().zip(&mut b[..count]) {
        *x = add_noise(*x, level, noise);
        *y = add_noise(*y, level, noise);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed sequence of samples.
    struct Scripted(Vec<f64>);

    impl NoiseSource for Scripted {
        fn uniform_sample(&mut self) -> f64 {
            self.0.remove(0)
        }
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = UniformNoise::seeded(11);
        let mut b = UniformNoise::seeded(11);
        for _ in 0..32 {
            assert_eq!(a.uniform_sample(), b.uniform_sample());
        }
    }

    #[test]
    fn samples_stay_in_unit_interval() {
        let mut noise = UniformNoise::seeded(3);
        for _ in 0..10_000 {
            let u = noise.uniform_sample();
            assert!((-1.0..=1.0).contains(&u), "{u}");
        }
    }

    #[test]
    fn add_noise_scales_by_level() {
        let mut noise = Scripted(vec![1.0, -0.5]);
        assert_eq!(add_noise(10.0, 2.0, &mut noise), 10.0 + 2.0 * NOISE_SCALE);
        assert_eq!(add_noise(10.0, 2.0, &mut noise), 10.0 - 1.0 * NOISE_SCALE);
    }

    #[test]
    fn pair_interleaves_draws() {
        let mut noise = Scripted(vec![1.0, -1.0, 0.0, 0.5]);
        let mut a = [1.0, 2.0, 3.0];
        let mut b = [4.0, 5.0, 6.0];
        add_noise_pair(&mut a, &mut b, 2, 1000.0, &mut noise).unwrap();
        assert_eq!(a, [2.0, 2.0, 3.0]);
        assert_eq!(b, [3.0, 5.5, 6.0]);
    }

    #[test]
    fn pair_rejects_short_sequences() {
        let mut noise = UniformNoise::seeded(0);
        let mut a = [0.0; 3];
        let mut b = [0.0; 2];
        let err = add_noise_pair(&mut a, &mut b, 3, 1.0, &mut noise).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::LengthMismatch {
                what: "second sequence",
                len: 2,
                count: 3
            }
        ));
    }

    #[test]
    fn zero_level_is_passthrough() {
        let mut samples = [1.5, -2.0, 0.0];
        add_noise_slice(&mut samples, 0.0, &mut SharedNoise::global());
        assert_eq!(samples, [1.5, -2.0, 0.0]);
    }
}
