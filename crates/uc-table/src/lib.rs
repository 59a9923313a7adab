//! uc-table: conversion tables and the piecewise-linear lookup engine.
//!
//! Contains:
//! - numeric (Real + finite-value checks)
//! - table (validated, immutable breakpoint table)
//! - lookup (direction-agnostic interpolation/extrapolation)
//! - loader (text table parsing and resource resolution)
//! - error (table loading errors)

pub mod error;
pub mod loader;
pub mod lookup;
pub mod numeric;
pub mod table;

pub use error::{TableError, TableResult};
pub use loader::{TableLoader, parse_table};
pub use lookup::Region;
pub use numeric::*;
pub use table::{Axis, ConversionTable, Row};
