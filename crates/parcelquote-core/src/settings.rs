use rust_decimal::Decimal;

use crate::limits::CarrierServiceLimits;

pub const DEFAULT_API_BASE_URL: &str = "https://digitalapi.auspost.com.au/";
pub const DEFAULT_DOMESTIC_COUNTRY: &str = "AU";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Per-store carrier settings, passed explicitly to every quote call.
#[derive(Clone)]
pub struct CarrierSettings {
    pub api_key: String,
    /// Flat amount added to every returned option, in the store's primary currency.
    pub additional_handling_charge: Decimal,
    /// ISO alpha-2 code of the carrier's home country.
    pub domestic_country_code: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub limits: CarrierServiceLimits,
}

impl CarrierSettings {
    /// Settings for the production Australia Post API with no surcharge.
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            additional_handling_charge: Decimal::ZERO,
            domestic_country_code: DEFAULT_DOMESTIC_COUNTRY.to_owned(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            limits: CarrierServiceLimits::AUSPOST,
        }
    }

    #[must_use]
    pub fn with_additional_handling_charge(mut self, charge: Decimal) -> Self {
        self.additional_handling_charge = charge;
        self
    }

    #[must_use]
    pub fn with_api_base_url(mut self, base_url: &str) -> Self {
        base_url.clone_into(&mut self.api_base_url);
        self
    }

    /// Returns `true` if `country_code` is the carrier's home country.
    #[must_use]
    pub fn is_domestic(&self, country_code: &str) -> bool {
        self.domestic_country_code.eq_ignore_ascii_case(country_code)
    }
}

impl std::fmt::Debug for CarrierSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarrierSettings")
            .field("api_key", &"[redacted]")
            .field(
                "additional_handling_charge",
                &self.additional_handling_charge,
            )
            .field("domestic_country_code", &self.domestic_country_code)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("limits", &self.limits)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let settings = CarrierSettings::new("super-secret");
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn is_domestic_ignores_case() {
        let settings = CarrierSettings::new("key");
        assert!(settings.is_domestic("au"));
        assert!(settings.is_domestic("AU"));
        assert!(!settings.is_domestic("NZ"));
    }
}
