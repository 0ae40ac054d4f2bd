use std::str::FromStr;

use rust_decimal::Decimal;

use crate::limits::CarrierServiceLimits;
use crate::settings::{
    CarrierSettings, DEFAULT_API_BASE_URL, DEFAULT_DOMESTIC_COUNTRY, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::ConfigError;

/// Load carrier settings from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_carrier_settings() -> Result<CarrierSettings, ConfigError> {
    dotenvy::dotenv().ok();
    load_carrier_settings_from_env()
}

/// Load carrier settings from environment variables already in the process.
///
/// Unlike [`load_carrier_settings`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_carrier_settings_from_env() -> Result<CarrierSettings, ConfigError> {
    build_carrier_settings(|key| std::env::var(key))
}

/// Build carrier settings using the provided env-var lookup function.
///
/// Recognised variables:
///
/// | Variable | Default |
/// |----------|---------|
/// | `AUSPOST_API_KEY` | required |
/// | `PARCELQUOTE_ADDITIONAL_HANDLING_CHARGE` | `0` |
/// | `PARCELQUOTE_DOMESTIC_COUNTRY` | `AU` |
/// | `PARCELQUOTE_API_BASE_URL` | `https://digitalapi.auspost.com.au/` |
/// | `PARCELQUOTE_REQUEST_TIMEOUT_SECS` | `30` |
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn build_carrier_settings<F>(lookup: F) -> Result<CarrierSettings, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_decimal = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        let raw = or_default(var, default);
        Decimal::from_str(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_key = require("AUSPOST_API_KEY")?;

    let additional_handling_charge = parse_decimal("PARCELQUOTE_ADDITIONAL_HANDLING_CHARGE", "0")?;
    if additional_handling_charge.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar {
            var: "PARCELQUOTE_ADDITIONAL_HANDLING_CHARGE".to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    let domestic_country_code =
        parse_country_code(&or_default("PARCELQUOTE_DOMESTIC_COUNTRY", DEFAULT_DOMESTIC_COUNTRY))?;

    let api_base_url = or_default("PARCELQUOTE_API_BASE_URL", DEFAULT_API_BASE_URL);

    let request_timeout_secs = parse_u64(
        "PARCELQUOTE_REQUEST_TIMEOUT_SECS",
        &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
    )?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PARCELQUOTE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(CarrierSettings {
        api_key,
        additional_handling_charge,
        domestic_country_code,
        api_base_url,
        request_timeout_secs,
        limits: CarrierServiceLimits::AUSPOST,
    })
}

/// Validate a two-letter ISO country code and upper-case it.
fn parse_country_code(raw: &str) -> Result<String, ConfigError> {
    let code = raw.trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_uppercase())
    } else {
        Err(ConfigError::InvalidEnvVar {
            var: "PARCELQUOTE_DOMESTIC_COUNTRY".to_string(),
            reason: format!("expected a two-letter ISO code, got '{raw}'"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("AUSPOST_API_KEY", "test-key");
        m
    }

    #[test]
    fn build_carrier_settings_fails_without_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_carrier_settings(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "AUSPOST_API_KEY"),
            "expected MissingEnvVar(AUSPOST_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_carrier_settings_treats_blank_api_key_as_missing() {
        let mut map = HashMap::new();
        map.insert("AUSPOST_API_KEY", "   ");
        let result = build_carrier_settings(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn build_carrier_settings_applies_defaults() {
        let map = full_env();
        let cfg = build_carrier_settings(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_key, "test-key");
        assert_eq!(cfg.additional_handling_charge, Decimal::ZERO);
        assert_eq!(cfg.domestic_country_code, "AU");
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.limits, CarrierServiceLimits::AUSPOST);
    }

    #[test]
    fn build_carrier_settings_reads_overrides() {
        let mut map = full_env();
        map.insert("PARCELQUOTE_ADDITIONAL_HANDLING_CHARGE", "3.50");
        map.insert("PARCELQUOTE_DOMESTIC_COUNTRY", "nz");
        map.insert("PARCELQUOTE_API_BASE_URL", "http://localhost:9999");
        map.insert("PARCELQUOTE_REQUEST_TIMEOUT_SECS", "5");
        let cfg = build_carrier_settings(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.additional_handling_charge, Decimal::new(350, 2));
        assert_eq!(cfg.domestic_country_code, "NZ");
        assert_eq!(cfg.api_base_url, "http://localhost:9999");
        assert_eq!(cfg.request_timeout_secs, 5);
    }

    #[test]
    fn build_carrier_settings_rejects_invalid_charge() {
        let mut map = full_env();
        map.insert("PARCELQUOTE_ADDITIONAL_HANDLING_CHARGE", "three dollars");
        let result = build_carrier_settings(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PARCELQUOTE_ADDITIONAL_HANDLING_CHARGE"),
            "expected InvalidEnvVar, got: {result:?}"
        );
    }

    #[test]
    fn build_carrier_settings_rejects_negative_charge() {
        let mut map = full_env();
        map.insert("PARCELQUOTE_ADDITIONAL_HANDLING_CHARGE", "-1");
        let result = build_carrier_settings(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
    }

    #[test]
    fn build_carrier_settings_rejects_bad_country_code() {
        let mut map = full_env();
        map.insert("PARCELQUOTE_DOMESTIC_COUNTRY", "AUS");
        let result = build_carrier_settings(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PARCELQUOTE_DOMESTIC_COUNTRY"),
            "expected InvalidEnvVar(PARCELQUOTE_DOMESTIC_COUNTRY), got: {result:?}"
        );
    }

    #[test]
    fn build_carrier_settings_rejects_zero_timeout() {
        let mut map = full_env();
        map.insert("PARCELQUOTE_REQUEST_TIMEOUT_SECS", "0");
        let result = build_carrier_settings(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
    }
}
