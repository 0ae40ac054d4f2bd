//! Shipment requests handed to the quote engine and the options it returns.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of the order being shipped.
///
/// Weight and dimensions are per unit, in the store's primary units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: u32,
    pub weight: Decimal,
    pub length: Decimal,
    pub width: Decimal,
    pub height: Decimal,
}

/// Destination of a shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Host-side country identifier, resolved through a
    /// [`crate::CountryLookup`].
    pub country: Option<String>,
    pub zip_postal_code: Option<String>,
}

/// Immutable input to a rate quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub origin_zip: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
    pub items: Vec<LineItem>,
}

impl ShipmentRequest {
    /// Total weight of all items, in primary units.
    ///
    /// Returns `None` if the total does not fit in a [`Decimal`].
    #[must_use]
    pub fn total_weight(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            total.checked_add(item.weight.checked_mul(Decimal::from(item.quantity))?)
        })
    }

    /// Returns `(length, width, height)` of the consolidated shipment, in
    /// primary units.
    ///
    /// A single item with quantity 1 keeps its own dimensions. Anything else
    /// is treated as a cube holding the combined volume of every unit.
    ///
    /// Returns `None` if the combined volume does not fit in a [`Decimal`].
    #[must_use]
    pub fn dimensions(&self) -> Option<(Decimal, Decimal, Decimal)> {
        if let [item] = self.items.as_slice() {
            if item.quantity == 1 {
                return Some((item.length, item.width, item.height));
            }
        }

        let total_volume = self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            let volume = item
                .length
                .checked_mul(item.width)?
                .checked_mul(item.height)?
                .checked_mul(Decimal::from(item.quantity))?;
            total.checked_add(volume)
        })?;
        let side = cube_root(total_volume);
        Some((side, side, side))
    }
}

/// Cube root rounded to four places, so float noise such as
/// `9.999999999999998` does not tip a later ceiling up by one.
fn cube_root(value: Decimal) -> Decimal {
    value
        .to_f64()
        .map(f64::cbrt)
        .and_then(Decimal::from_f64)
        .map_or(Decimal::ZERO, |d| d.round_dp(4))
}

/// A priced shipping option returned to the checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingOption {
    /// Carrier service code, e.g. `"AUS_PARCEL_REGULAR"`.
    pub code: String,
    pub name: String,
    /// Estimated delivery text, when the carrier provides one.
    pub description: Option<String>,
    pub rate: Decimal,
    pub currency_code: String,
}

/// Result of a quote call: either options or user-visible errors, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub shipping_options: Vec<ShippingOption>,
    pub errors: Vec<String>,
}

impl QuoteResponse {
    #[must_use]
    pub fn from_options(shipping_options: Vec<ShippingOption>) -> Self {
        Self {
            shipping_options,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            shipping_options: Vec::new(),
            errors: vec![message.into()],
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
