use thiserror::Error;

/// Errors raised while building [`crate::CarrierSettings`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised by a [`crate::CurrencyConverter`].
#[derive(Debug, Error)]
pub enum CurrencyError {
    /// No exchange rate is known for the requested currency code.
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    /// The configured exchange rate cannot be divided by (zero or negative).
    #[error("invalid exchange rate {rate} for {code}")]
    InvalidRate {
        code: String,
        rate: rust_decimal::Decimal,
    },
}

/// A [`crate::CarrierServiceLimits`] value the package splitter cannot use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitsError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{min_field} ({min}) exceeds {max_field} ({max})")]
    MinAboveMax {
        min_field: &'static str,
        min: u32,
        max_field: &'static str,
        max: u32,
    },
}
