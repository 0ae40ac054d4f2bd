//! Australia Post PAC response types.
//!
//! The rate endpoints answer either
//! `{"services": {"service": [...]}}` or `{"error": {"errorMessage": "..."}}`,
//! with `service` collapsing to a bare object when only one service applies.
//! [`ParsedResponse::from_body`] decides which shape a body has exactly once.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Currency every PAC price is quoted in.
pub const CARRIER_CURRENCY: &str = "AUD";

/// A single postage service quoted by the carrier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Service {
    pub code: String,
    pub name: String,
    /// Price of one parcel in AUD. PAC sends a string (`"16.15"`); bare
    /// numbers are accepted too.
    pub price: Decimal,
    /// Free-text delivery estimate, e.g. `"Delivered in up to 3 business days"`.
    #[serde(default)]
    pub delivery_time: Option<String>,
    #[serde(default)]
    pub max_extra_cover: Option<Decimal>,
}

/// Either a single item or a list; PAC drops the array for one service.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServicesEnvelope {
    #[serde(default)]
    service: Option<OneOrMany<Service>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "errorMessage", default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    services: Option<ServicesEnvelope>,
    #[serde(default)]
    error: Option<ErrorEnvelope>,
}

/// The shape of a rate response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// `services.service` was present.
    Services(Vec<Service>),
    /// `error.errorMessage` was present and `services.service` was not.
    Error(String),
    /// Empty body, invalid JSON, or neither known path.
    Malformed(String),
}

impl ParsedResponse {
    /// Classifies a raw response body.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return ParsedResponse::Malformed("empty response body".to_owned());
        }

        let raw: RawResponse = match serde_json::from_str(body) {
            Ok(raw) => raw,
            Err(e) => return ParsedResponse::Malformed(e.to_string()),
        };

        if let Some(services) = raw.services.and_then(|s| s.service) {
            return ParsedResponse::Services(services.into_vec());
        }

        match raw.error.and_then(|e| e.error_message) {
            Some(message) => ParsedResponse::Error(message),
            None => ParsedResponse::Malformed(
                "neither services.service nor error.errorMessage present".to_owned(),
            ),
        }
    }
}
