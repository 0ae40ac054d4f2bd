//! Measurement units and conversion from the store's primary units.
//!
//! The host store keeps weights and dimensions in a configurable "primary"
//! unit. Every other unit is described by a ratio: a value in the primary
//! unit multiplied by the ratio gives the value in that unit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// System keyword of the gram weight unit.
pub const GRAMS: &str = "grams";

/// System keyword of the millimetre dimension unit.
pub const MILLIMETRES: &str = "millimetres";

/// A named weight or dimension unit and its ratio to the primary unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureUnit {
    pub system_keyword: String,
    pub ratio: Decimal,
}

impl MeasureUnit {
    #[must_use]
    pub fn new(system_keyword: &str, ratio: Decimal) -> Self {
        Self {
            system_keyword: system_keyword.to_owned(),
            ratio,
        }
    }
}

/// Converts weights and dimensions out of the store's primary units.
pub trait MeasureConverter: Send + Sync {
    /// Looks up a weight unit by system keyword (e.g. `"grams"`).
    fn weight_unit(&self, system_keyword: &str) -> Option<&MeasureUnit>;

    /// Looks up a dimension unit by system keyword (e.g. `"millimetres"`).
    fn dimension_unit(&self, system_keyword: &str) -> Option<&MeasureUnit>;

    /// Converts a weight expressed in the primary unit into `unit`.
    ///
    /// Returns `None` if the result does not fit in a [`Decimal`].
    fn convert_from_primary_weight(&self, value: Decimal, unit: &MeasureUnit) -> Option<Decimal> {
        value.checked_mul(unit.ratio)
    }

    /// Converts a dimension expressed in the primary unit into `unit`.
    ///
    /// Returns `None` if the result does not fit in a [`Decimal`].
    fn convert_from_primary_dimension(
        &self,
        value: Decimal,
        unit: &MeasureUnit,
    ) -> Option<Decimal> {
        value.checked_mul(unit.ratio)
    }
}

/// In-memory table of weight and dimension units.
#[derive(Debug, Clone, Default)]
pub struct MeasureCatalog {
    weights: Vec<MeasureUnit>,
    dimensions: Vec<MeasureUnit>,
}

impl MeasureCatalog {
    #[must_use]
    pub fn new(weights: Vec<MeasureUnit>, dimensions: Vec<MeasureUnit>) -> Self {
        Self {
            weights,
            dimensions,
        }
    }

    /// Catalog for a store whose primary units are kilograms and centimetres.
    #[must_use]
    pub fn metric_kg_cm() -> Self {
        Self::new(
            vec![
                MeasureUnit::new("kg", Decimal::ONE),
                MeasureUnit::new(GRAMS, Decimal::from(1_000)),
            ],
            vec![
                MeasureUnit::new("centimetres", Decimal::ONE),
                MeasureUnit::new(MILLIMETRES, Decimal::TEN),
                MeasureUnit::new("meters", Decimal::new(1, 2)),
            ],
        )
    }

    /// Catalog for a store whose primary units are pounds and inches.
    #[must_use]
    pub fn imperial_lb_in() -> Self {
        Self::new(
            vec![
                MeasureUnit::new("lb", Decimal::ONE),
                MeasureUnit::new("ounce", Decimal::from(16)),
                MeasureUnit::new(GRAMS, Decimal::new(45_359_237, 5)),
            ],
            vec![
                MeasureUnit::new("inches", Decimal::ONE),
                MeasureUnit::new("feet", Decimal::new(833_333_333, 10)),
                MeasureUnit::new(MILLIMETRES, Decimal::new(254, 1)),
            ],
        )
    }
}

impl MeasureConverter for MeasureCatalog {
    fn weight_unit(&self, system_keyword: &str) -> Option<&MeasureUnit> {
        self.weights
            .iter()
            .find(|u| u.system_keyword.eq_ignore_ascii_case(system_keyword))
    }

    fn dimension_unit(&self, system_keyword: &str) -> Option<&MeasureUnit> {
        self.dimensions
            .iter()
            .find(|u| u.system_keyword.eq_ignore_ascii_case(system_keyword))
    }
}
