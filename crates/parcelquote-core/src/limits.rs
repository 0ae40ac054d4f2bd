//! Carrier size and weight limits, in carrier units (millimetres and grams).

use crate::error::LimitsError;

/// Millimetres in one centimetre.
pub const MILLIMETRES_PER_CENTIMETRE: u32 = 10;

/// Grams in one kilogram.
pub const GRAMS_PER_KILOGRAM: u32 = 1_000;

/// Size and weight limits the carrier enforces on a single parcel.
///
/// All lengths are millimetres and all weights are grams. Girth is
/// `2 × (height + width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierServiceLimits {
    pub min_length_mm: u32,
    pub max_length_mm: u32,
    pub min_girth_mm: u32,
    pub max_girth_mm: u32,
    pub min_weight_g: u32,
    pub max_domestic_weight_g: u32,
    pub max_international_weight_g: u32,
}

impl CarrierServiceLimits {
    /// Limits published for Australia Post parcel services.
    pub const AUSPOST: Self = Self {
        min_length_mm: 50,
        max_length_mm: 1_050,
        min_girth_mm: 160,
        max_girth_mm: 1_400,
        min_weight_g: 500,
        max_domestic_weight_g: 22_000,
        max_international_weight_g: 20_000,
    };

    /// Checks that every maximum is positive and no minimum exceeds its
    /// maximum.
    ///
    /// # Errors
    ///
    /// Returns the first [`LimitsError`] found.
    pub fn validate(&self) -> Result<(), LimitsError> {
        let maxima = [
            ("max_length_mm", self.max_length_mm),
            ("max_girth_mm", self.max_girth_mm),
            ("max_domestic_weight_g", self.max_domestic_weight_g),
            ("max_international_weight_g", self.max_international_weight_g),
        ];
        if let Some((field, _)) = maxima.into_iter().find(|&(_, value)| value == 0) {
            return Err(LimitsError::Zero { field });
        }

        let ranges = [
            ("min_length_mm", self.min_length_mm, "max_length_mm", self.max_length_mm),
            ("min_girth_mm", self.min_girth_mm, "max_girth_mm", self.max_girth_mm),
            (
                "min_weight_g",
                self.min_weight_g,
                "max_domestic_weight_g",
                self.max_domestic_weight_g,
            ),
            (
                "min_weight_g",
                self.min_weight_g,
                "max_international_weight_g",
                self.max_international_weight_g,
            ),
        ];
        for (min_field, min, max_field, max) in ranges {
            if min > max {
                return Err(LimitsError::MinAboveMax {
                    min_field,
                    min,
                    max_field,
                    max,
                });
            }
        }

        Ok(())
    }

    /// Returns the per-parcel weight ceiling for the destination kind.
    #[must_use]
    pub fn max_weight_g(&self, is_domestic: bool) -> u32 {
        if is_domestic {
            self.max_domestic_weight_g
        } else {
            self.max_international_weight_g
        }
    }
}

impl Default for CarrierServiceLimits {
    fn default() -> Self {
        Self::AUSPOST
    }
}
