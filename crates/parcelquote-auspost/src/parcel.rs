//! Unit normalization and package splitting.
//!
//! Converts a shipment from the store's primary units into whole grams and
//! millimetres, works out how many parcels the carrier's limits require, and
//! produces the per-parcel descriptor sent to the rate API.

use parcelquote_core::limits::{GRAMS_PER_KILOGRAM, MILLIMETRES_PER_CENTIMETRE};
use parcelquote_core::measure::{GRAMS, MILLIMETRES};
use parcelquote_core::{CarrierServiceLimits, MeasureConverter, ShipmentRequest};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::QuoteError;

/// Whole shipment measured in carrier units, with minimums applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasuredShipment {
    pub weight_g: u32,
    pub length_mm: u32,
    pub width_mm: u32,
    pub height_mm: u32,
}

/// A single parcel after splitting, plus how many identical parcels ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedParcel {
    pub weight_g: u32,
    pub length_mm: u32,
    pub width_mm: u32,
    pub height_mm: u32,
    pub package_count: u32,
}

/// Per-parcel values in the units the rate API takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParcelDescriptor {
    pub length_cm: u32,
    pub width_cm: u32,
    pub height_cm: u32,
    /// Kilograms, two decimal places.
    pub weight_kg: Decimal,
    pub package_count: u32,
}

/// Measures `request` in grams and millimetres.
///
/// Every conversion rounds up, then each value is raised to the carrier
/// minimum.
///
/// # Errors
///
/// - [`QuoteError::MeasureUnitMissing`] if the converter has no `"grams"` or
///   `"millimetres"` unit.
/// - [`QuoteError::MeasurementOverflow`] if the totals or conversions do not
///   fit in a [`Decimal`].
pub fn measure_shipment(
    request: &ShipmentRequest,
    measures: &dyn MeasureConverter,
    limits: &CarrierServiceLimits,
) -> Result<MeasuredShipment, QuoteError> {
    let grams = measures
        .weight_unit(GRAMS)
        .ok_or_else(|| QuoteError::MeasureUnitMissing(GRAMS.to_owned()))?;
    let millimetres = measures
        .dimension_unit(MILLIMETRES)
        .ok_or_else(|| QuoteError::MeasureUnitMissing(MILLIMETRES.to_owned()))?;

    let (length, width, height) = request
        .dimensions()
        .ok_or(QuoteError::MeasurementOverflow("volume"))?;
    let to_mm = |value: Decimal| -> Result<u32, QuoteError> {
        let mm = measures
            .convert_from_primary_dimension(value, millimetres)
            .ok_or(QuoteError::MeasurementOverflow("dimension"))?;
        Ok(ceil_to_u32(mm).max(limits.min_length_mm))
    };

    let total_weight = request
        .total_weight()
        .ok_or(QuoteError::MeasurementOverflow("weight"))?;
    let weight_g = measures
        .convert_from_primary_weight(total_weight, grams)
        .ok_or(QuoteError::MeasurementOverflow("weight"))?;

    Ok(MeasuredShipment {
        weight_g: ceil_to_u32(weight_g).max(limits.min_weight_g),
        length_mm: to_mm(length)?,
        width_mm: to_mm(width)?,
        height_mm: to_mm(height)?,
    })
}

/// Splits a measured shipment into identical parcels that fit the limits.
///
/// The package count is fixed before dividing, so the divided parcel may be
/// well under the limits; the carrier bills per parcel either way.
///
/// Expects limits that pass [`CarrierServiceLimits::validate`]; a zero
/// maximum is treated as 1 rather than divided by.
#[must_use]
pub fn split_packages(
    shipment: MeasuredShipment,
    limits: &CarrierServiceLimits,
    is_domestic: bool,
) -> NormalizedParcel {
    let MeasuredShipment {
        mut weight_g,
        mut length_mm,
        mut width_mm,
        mut height_mm,
    } = shipment;

    let max_length = limits.max_length_mm.max(1);
    let longest = length_mm.max(width_mm).max(height_mm);
    let by_dims = if longest > max_length {
        longest.div_ceil(max_length)
    } else {
        1
    };

    let max_weight = limits.max_weight_g(is_domestic).max(1);
    let by_weight = if weight_g > max_weight {
        weight_g.div_ceil(max_weight)
    } else {
        1
    };

    let package_count = by_dims.max(by_weight).max(1);

    if package_count > 1 {
        weight_g = (weight_g / package_count).max(limits.min_weight_g);
        length_mm = (length_mm / package_count).max(limits.min_length_mm);
        width_mm = (width_mm / package_count).max(limits.min_length_mm);
        height_mm = (height_mm / package_count).max(limits.min_length_mm);
    }

    let (width_mm, height_mm) = adjust_girth(width_mm, height_mm, limits);

    NormalizedParcel {
        weight_g,
        length_mm,
        width_mm,
        height_mm,
        package_count,
    }
}

/// Pulls width and height back inside the carrier's girth window.
///
/// Returns `(width_mm, height_mm)`.
#[must_use]
pub fn adjust_girth(width_mm: u32, height_mm: u32, limits: &CarrierServiceLimits) -> (u32, u32) {
    let girth = 2 * (u64::from(height_mm) + u64::from(width_mm));
    if girth < u64::from(limits.min_girth_mm) {
        (limits.min_length_mm, limits.min_length_mm)
    } else if girth > u64::from(limits.max_girth_mm) {
        let side = limits.max_length_mm / 4;
        (side, side)
    } else {
        (width_mm, height_mm)
    }
}

impl NormalizedParcel {
    /// Converts to whole centimetres (rounded up) and kilograms (two places).
    #[must_use]
    pub fn descriptor(&self) -> ParcelDescriptor {
        ParcelDescriptor {
            length_cm: mm_to_cm(self.length_mm),
            width_cm: mm_to_cm(self.width_mm),
            height_cm: mm_to_cm(self.height_mm),
            weight_kg: grams_to_kg(self.weight_g),
            package_count: self.package_count,
        }
    }
}

#[must_use]
pub fn mm_to_cm(mm: u32) -> u32 {
    mm.div_ceil(MILLIMETRES_PER_CENTIMETRE)
}

#[must_use]
pub fn grams_to_kg(grams: u32) -> Decimal {
    (Decimal::from(grams) / Decimal::from(GRAMS_PER_KILOGRAM)).round_dp(2)
}

/// Rounds up to a whole number; negatives become 0 and overflow saturates.
fn ceil_to_u32(value: Decimal) -> u32 {
    if value <= Decimal::ZERO {
        return 0;
    }
    value.ceil().to_u32().unwrap_or(u32::MAX)
}
