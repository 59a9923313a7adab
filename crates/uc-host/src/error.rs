//! Error types for the host adapter layer.

use thiserror::Error;

pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Record not initialized: {identifier}")]
    UnknownRecord { identifier: String },

    #[error("Record already initialized: {identifier}")]
    DuplicateRecord { identifier: String },

    #[error("Unsupported conversion arity: {pairs} slot pairs (expected 1 to 3)")]
    InvalidArity { pairs: usize },

    #[error("Slot {slot} has no value")]
    MissingSlot { slot: String },

    #[error("Slot {slot} is not writable")]
    ReadOnlySlot { slot: String },

    #[error("Conversion error: {0}")]
    Convert(#[from] uc_convert::ConvertError),
}
