//! Pre-flight checks on a [`ShipmentRequest`].

use parcelquote_core::{CountryLookup, ShipmentRequest};

use crate::error::ValidationError;

/// Where a validated shipment goes, with every field resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub origin_zip: String,
    /// ISO alpha-2 destination country code.
    pub country_code: String,
    pub destination_zip: String,
}

/// Checks that `request` carries everything a quote needs.
///
/// A country identifier the lookup cannot resolve counts as missing.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, checked in the order: items,
/// shipping address, country, destination zip, origin zip.
pub fn validate_request(
    request: &ShipmentRequest,
    countries: &dyn CountryLookup,
) -> Result<Route, ValidationError> {
    if request.items.is_empty() {
        return Err(ValidationError::MissingItems);
    }

    let address = request
        .shipping_address
        .as_ref()
        .ok_or(ValidationError::MissingShippingAddress)?;

    let country_code = address
        .country
        .as_deref()
        .and_then(|c| countries.two_letter_iso(c))
        .ok_or(ValidationError::MissingCountry)?;

    let destination_zip = non_blank(address.zip_postal_code.as_deref())
        .ok_or(ValidationError::MissingDestinationZip)?;

    let origin_zip =
        non_blank(request.origin_zip.as_deref()).ok_or(ValidationError::MissingOriginZip)?;

    Ok(Route {
        origin_zip,
        country_code,
        destination_zip,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use parcelquote_core::{CountryTable, LineItem, ShippingAddress};
    use rust_decimal::Decimal;

    use super::*;

    fn valid_request() -> ShipmentRequest {
        ShipmentRequest {
            origin_zip: Some("3000".to_owned()),
            shipping_address: Some(ShippingAddress {
                country: Some("AU".to_owned()),
                zip_postal_code: Some("2000".to_owned()),
            }),
            items: vec![LineItem {
                quantity: 1,
                weight: Decimal::ONE,
                length: Decimal::TEN,
                width: Decimal::TEN,
                height: Decimal::TEN,
            }],
        }
    }

    #[test]
    fn valid_request_resolves_route() {
        let route = validate_request(&valid_request(), &CountryTable::new()).unwrap();
        assert_eq!(
            route,
            Route {
                origin_zip: "3000".to_owned(),
                country_code: "AU".to_owned(),
                destination_zip: "2000".to_owned(),
            }
        );
    }

    #[test]
    fn missing_items() {
        let mut request = valid_request();
        request.items.clear();
        assert_eq!(
            validate_request(&request, &CountryTable::new()),
            Err(ValidationError::MissingItems)
        );
    }

    #[test]
    fn missing_shipping_address() {
        let mut request = valid_request();
        request.shipping_address = None;
        assert_eq!(
            validate_request(&request, &CountryTable::new()),
            Err(ValidationError::MissingShippingAddress)
        );
    }

    #[test]
    fn missing_country() {
        let mut request = valid_request();
        request.shipping_address.as_mut().unwrap().country = None;
        assert_eq!(
            validate_request(&request, &CountryTable::new()),
            Err(ValidationError::MissingCountry)
        );
    }

    #[test]
    fn unresolvable_country_counts_as_missing() {
        let mut request = valid_request();
        request.shipping_address.as_mut().unwrap().country = Some("Atlantis".to_owned());
        assert_eq!(
            validate_request(&request, &CountryTable::new()),
            Err(ValidationError::MissingCountry)
        );
    }

    #[test]
    fn country_alias_is_resolved() {
        let mut request = valid_request();
        request.shipping_address.as_mut().unwrap().country = Some("New Zealand".to_owned());
        let countries = CountryTable::new().with_alias("New Zealand", "NZ");
        let route = validate_request(&request, &countries).unwrap();
        assert_eq!(route.country_code, "NZ");
    }

    #[test]
    fn missing_destination_zip() {
        let mut request = valid_request();
        request.shipping_address.as_mut().unwrap().zip_postal_code = Some("  ".to_owned());
        assert_eq!(
            validate_request(&request, &CountryTable::new()),
            Err(ValidationError::MissingDestinationZip)
        );
    }

    #[test]
    fn missing_origin_zip() {
        let mut request = valid_request();
        request.origin_zip = None;
        assert_eq!(
            validate_request(&request, &CountryTable::new()),
            Err(ValidationError::MissingOriginZip)
        );
    }
}
