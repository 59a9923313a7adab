//! Adapter between the conversion engine and a host record-processing framework.
//!
//! The host calls two hooks:
//! - `init`, once per record, with the record identifier: builds and caches a
//!   [`ConversionRecord`] in a [`RecordRegistry`]
//! - `process`, repeatedly: reads the bound input slots, converts, writes the outputs
//!
//! Host record layouts stay behind the [`RecordSlots`] trait, so nothing in the
//! conversion path depends on a host type.

pub mod error;
pub mod noise_record;
pub mod record;
pub mod registry;
pub mod slots;

pub use error::{HostError, HostResult};
pub use noise_record::NoiseRecord;
pub use record::{Arity, ConversionBinding, ConversionRecord, SlotPair};
pub use registry::RecordRegistry;
pub use slots::{RecordSlots, SlotMap};
