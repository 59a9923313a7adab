//! Bidirectional scalar conversion backed by one conversion table.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uc_table::{Axis, ConversionTable, Real, Region, TableLoader};

use crate::config::ConverterConfig;
use crate::naming::resource_name;
use crate::noise::NoiseSource;

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    EngineeringToPhysical,
    PhysicalToEngineering,
}

impl Direction {
    /// Unit space the input value is expressed in.
    pub fn source_axis(self) -> Axis {
        match self {
            Self::EngineeringToPhysical => Axis::Engineering,
            Self::PhysicalToEngineering => Axis::Physical,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::EngineeringToPhysical => Self::PhysicalToEngineering,
            Self::PhysicalToEngineering => Self::EngineeringToPhysical,
        }
    }
}

#[derive(Debug, Clone)]
enum State {
    /// Identity passthrough.
    NoTable,
    HasTable(ConversionTable),
}

/// Converter for one logical conversion point.
///
/// The table state is decided once at construction and never changes.
#[derive(Debug, Clone)]
pub struct UnitConverter {
    resource: Option<String>,
    state: State,
}

impl UnitConverter {
    /// Derive a resource name from `identifier` and load its table.
    ///
    /// Any failure (no name, missing file, unusable table) yields an identity converter.
    pub fn from_identifier(identifier: &str, config: &ConverterConfig) -> Self {
        match resource_name(identifier, config.naming) {
            Some(name) => Self::load(&name, &config.loader()),
            None => {
                warn!(
                    identifier,
                    naming = ?config.naming,
                    "no table name in identifier, converting as identity"
                );
                Self::identity()
            }
        }
    }

    /// Load the table called `resource` through `loader`.
    pub fn load(resource: &str, loader: &TableLoader) -> Self {
        let state = match loader.load(resource) {
            Ok(table) => {
                info!(resource, rows = table.row_count(), "converter has table");
                State::HasTable(table)
            }
            Err(err) => {
                warn!(resource, error = %err, "table unavailable, converting as identity");
                State::NoTable
            }
        };
        Self {
            resource: Some(resource.to_string()),
            state,
        }
    }

    pub fn with_table(table: ConversionTable) -> Self {
        Self {
            resource: None,
            state: State::HasTable(table),
        }
    }

    pub fn identity() -> Self {
        Self {
            resource: None,
            state: State::NoTable,
        }
    }

    pub fn has_table(&self) -> bool {
        matches!(self.state, State::HasTable(_))
    }

    pub fn table(&self) -> Option<&ConversionTable> {
        match &self.state {
            State::HasTable(table) => Some(table),
            State::NoTable => None,
        }
    }

    /// Resource name this converter was loaded from, if any.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    pub fn convert(&self, value: Real, direction: Direction) -> Real {
        match &self.state {
            State::NoTable => value,
            State::HasTable(table) => table.evaluate(value, direction.source_axis()),
        }
    }

    pub fn engineering_to_physical(&self, value: Real) -> Real {
        self.convert(value, Direction::EngineeringToPhysical)
    }

    pub fn physical_to_engineering(&self, value: Real) -> Real {
        self.convert(value, Direction::PhysicalToEngineering)
    }

    /// Converted value plus `amplitude * u`, `u` uniform in `[-1, 1]`.
    pub fn convert_with_noise(
        &self,
        value: Real,
        direction: Direction,
        amplitude: Real,
        noise: &mut impl NoiseSource,
    ) -> Real {
        self.convert(value, direction) + amplitude * noise.uniform_sample()
    }

    /// Whether `value` would be interpolated or extrapolated; `None` in identity mode.
    pub fn region(&self, value: Real, direction: Direction) -> Option<Region> {
        self.table()
            .map(|t| t.region(value, direction.source_axis()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::UniformNoise;
    use uc_table::Row;

    fn two_point() -> UnitConverter {
        UnitConverter::with_table(
            ConversionTable::new([Row::new(0.0, 0.5), Row::new(1.0, 2.5)]).unwrap(),
        )
    }

    fn three_point() -> UnitConverter {
        UnitConverter::with_table(
            ConversionTable::new([Row::new(0.0, 0.0), Row::new(2.0, 10.0), Row::new(4.0, 12.0)])
                .unwrap(),
        )
    }

    #[test]
    fn midpoint_and_extrapolation() {
        let c = two_point();
        assert_eq!(c.engineering_to_physical(0.5), 1.5);
        assert_eq!(c.engineering_to_physical(2.0), 4.5);
        assert_eq!(c.physical_to_engineering(1.5), 0.5);
    }

    #[test]
    fn boundary_classification() {
        let c = three_point();
        let dir = Direction::EngineeringToPhysical;
        assert_eq!(c.region(0.0, dir), Some(Region::Inside));
        assert_eq!(c.region(4.0, dir), Some(Region::Above));
        assert_eq!(c.engineering_to_physical(4.0), 12.0);
        assert_eq!(c.engineering_to_physical(0.0), 0.0);
    }

    #[test]
    fn extrapolation_slopes_for_three_points() {
        let c = three_point();
        // first segment slope 5, last segment slope 1
        assert_eq!(c.engineering_to_physical(-1.0), -5.0);
        assert_eq!(c.engineering_to_physical(6.0), 14.0);
        // reverse direction: slopes 0.2 and 1
        assert_eq!(c.physical_to_engineering(-5.0), -1.0);
        assert_eq!(c.physical_to_engineering(13.0), 5.0);
    }

    #[test]
    fn identity_mode_passes_through() {
        let c = UnitConverter::identity();
        assert!(!c.has_table());
        assert_eq!(c.region(3.0, Direction::PhysicalToEngineering), None);
        for v in [-1e9, -1.0, 0.0, 0.25, 42.0] {
            assert_eq!(c.physical_to_engineering(v), v);
            assert_eq!(c.engineering_to_physical(v), v);
        }
    }

    #[test]
    fn noise_is_added_after_conversion() {
        let c = two_point();
        let mut noise = UniformNoise::seeded(5);
        for _ in 0..100 {
            let v = c.convert_with_noise(0.5, Direction::EngineeringToPhysical, 0.1, &mut noise);
            assert!((1.4..=1.6).contains(&v), "{v}");
        }
    }

    #[test]
    fn unresolvable_identifier_is_identity() {
        let config = ConverterConfig::with_table_dir("/nonexistent-table-dir");
        let c = UnitConverter::from_identifier("CONV-SI-QFA-RB", &config);
        assert!(!c.has_table());
        assert_eq!(c.resource(), Some("SI-QFA"));
        assert_eq!(c.physical_to_engineering(7.5), 7.5);

        let short = UnitConverter::from_identifier("Q", &config);
        assert_eq!(short.resource(), None);
        assert_eq!(short.engineering_to_physical(-3.0), -3.0);
    }
}
