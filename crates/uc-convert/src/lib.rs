//! Unit conversion between engineering and physical quantities.
//!
//! A [`UnitConverter`] is built from a record-style identifier. The identifier is reduced
//! to a table resource name ([`naming`]), the table is loaded once through
//! [`uc_table::TableLoader`], and every conversion afterwards is a piecewise-linear
//! lookup in that table. Without a usable table the converter is the identity function.
//!
//! Additive noise ([`noise`]) is drawn from an explicit [`NoiseSource`] so that callers
//! can inject a seeded generator.

pub mod config;
pub mod converter;
pub mod error;
pub mod naming;
pub mod noise;

pub use config::{ConverterConfig, load_config, save_config};
pub use converter::{Direction, UnitConverter};
pub use error::{ConvertError, ConvertResult};
pub use naming::{NamingStrategy, resource_name};
pub use noise::{
    NOISE_SCALE, NoiseSource, SharedNoise, UniformNoise, add_noise, add_noise_pair,
    add_noise_slice,
};
