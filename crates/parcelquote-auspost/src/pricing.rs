//! Turning carrier services into priced [`ShippingOption`]s.

use parcelquote_core::{CurrencyConverter, ShippingOption};
use rust_decimal::Decimal;

use crate::error::QuoteError;
use crate::types::{Service, CARRIER_CURRENCY};

/// Converts carrier services into options priced for `package_count`
/// identical parcels, in the store's primary currency.
///
/// All-or-nothing: if any price fails to convert, no options are returned.
///
/// # Errors
///
/// Returns [`QuoteError::Currency`] if a price cannot be converted.
pub fn price_services(
    services: Vec<Service>,
    package_count: u32,
    currencies: &dyn CurrencyConverter,
) -> Result<Vec<ShippingOption>, QuoteError> {
    let packages = Decimal::from(package_count);
    services
        .into_iter()
        .map(|service| -> Result<ShippingOption, QuoteError> {
            let unit_price = currencies.to_primary_store_currency(service.price, CARRIER_CURRENCY)?;
            Ok(ShippingOption {
                code: service.code,
                name: service.name,
                description: service.delivery_time,
                rate: unit_price * packages,
                currency_code: currencies.primary_currency_code().to_owned(),
            })
        })
        .collect()
}

/// Adds the flat handling charge to every option. Call once, after all
/// options are collected.
pub fn apply_handling_charge(options: &mut [ShippingOption], charge: Decimal) {
    for option in options {
        option.rate += charge;
    }
}
