use parcelquote_core::{CurrencyError, LimitsError};
use thiserror::Error;

/// User-visible text for failures whose detail must not reach the shopper.
pub const UNAVAILABLE_MESSAGE: &str =
    "Australia Post service is currently unavailable, try again later";

/// User-visible text for responses that match neither known shape.
pub const INVALID_RESPONSE_MESSAGE: &str = "Australia Post response is not valid";

/// A shipment request that cannot be quoted. Raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No shipment items")]
    MissingItems,

    #[error("Shipping address is not set")]
    MissingShippingAddress,

    #[error("Shipping country is not set")]
    MissingCountry,

    #[error("Shipping zip (postal code) is not set")]
    MissingDestinationZip,

    #[error("Shipping origin zip is not set")]
    MissingOriginZip,
}

/// Errors returned by the Australia Post rate-quote engine.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The carrier answered with a structured `error.errorMessage`.
    #[error("Australia Post error: {0}")]
    Carrier(String),

    /// Empty body, invalid JSON, or a JSON shape we do not recognise.
    #[error("invalid Australia Post response: {reason}")]
    InvalidResponse { reason: String },

    /// Network or TLS failure, including timeouts.
    #[error("HTTP error: {0}")]
    Unavailable(#[from] reqwest::Error),

    #[error("'{0}' measure unit could not be loaded")]
    MeasureUnitMissing(String),

    /// Shipment weight or size too large to compute with.
    #[error("shipment {0} overflows decimal arithmetic")]
    MeasurementOverflow(&'static str),

    #[error("invalid carrier limits: {0}")]
    InvalidLimits(#[from] LimitsError),

    #[error("currency conversion failed: {0}")]
    Currency(#[from] CurrencyError),

    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl QuoteError {
    /// Message suitable for showing to the shopper.
    ///
    /// Validation and carrier messages are passed through verbatim; anything
    /// internal collapses to a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            QuoteError::Validation(e) => e.to_string(),
            QuoteError::Carrier(message) => message.clone(),
            QuoteError::InvalidResponse { .. } => INVALID_RESPONSE_MESSAGE.to_string(),
            QuoteError::Unavailable(_)
            | QuoteError::MeasureUnitMissing(_)
            | QuoteError::MeasurementOverflow(_)
            | QuoteError::InvalidLimits(_)
            | QuoteError::Currency(_)
            | QuoteError::InvalidEndpoint { .. } => UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_shown_verbatim() {
        let err = QuoteError::from(ValidationError::MissingOriginZip);
        assert_eq!(err.user_message(), "Shipping origin zip is not set");
    }

    #[test]
    fn carrier_message_is_shown_verbatim() {
        let err = QuoteError::Carrier("Invalid postcode".to_owned());
        assert_eq!(err.user_message(), "Invalid postcode");
    }

    #[test]
    fn internal_failures_use_generic_message() {
        let err = QuoteError::MeasureUnitMissing("grams".to_owned());
        assert_eq!(err.user_message(), UNAVAILABLE_MESSAGE);

        let err = QuoteError::Currency(CurrencyError::UnknownCurrency("AUD".to_owned()));
        assert_eq!(err.user_message(), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn overflow_and_bad_limits_use_generic_message() {
        let err = QuoteError::MeasurementOverflow("volume");
        assert_eq!(err.user_message(), UNAVAILABLE_MESSAGE);

        let err = QuoteError::from(LimitsError::Zero {
            field: "max_length_mm",
        });
        assert_eq!(err.user_message(), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn invalid_response_hides_reason() {
        let err = QuoteError::InvalidResponse {
            reason: "expected value at line 1 column 1".to_owned(),
        };
        assert_eq!(err.user_message(), INVALID_RESPONSE_MESSAGE);
    }
}
