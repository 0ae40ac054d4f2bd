//! HTTP adapter for the Australia Post postage assessment (PAC) API.
//!
//! Chooses the domestic or international parcel service endpoint, encodes
//! the parcel descriptor as query parameters, and returns the raw response
//! body. Error statuses still carry a JSON body, so the body is returned
//! regardless of HTTP status and classified by the caller.

use std::time::Duration;

use parcelquote_core::CarrierSettings;
use reqwest::{Client, Url};

use crate::error::QuoteError;
use crate::parcel::ParcelDescriptor;

const DOMESTIC_PATH: &str = "postage/parcel/domestic/service.json";
const INTERNATIONAL_PATH: &str = "postage/parcel/international/service.json";

/// Header carrying the PAC API key.
pub const AUTH_KEY_HEADER: &str = "AUTH-KEY";

/// Which rate endpoint a query targets, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateQuery {
    Domestic {
        from_postcode: String,
        to_postcode: String,
        parcel: ParcelDescriptor,
    },
    International {
        country_code: String,
        parcel: ParcelDescriptor,
    },
}

impl RateQuery {
    fn path(&self) -> &'static str {
        match self {
            RateQuery::Domestic { .. } => DOMESTIC_PATH,
            RateQuery::International { .. } => INTERNATIONAL_PATH,
        }
    }

    /// Query parameters in the order PAC documents them.
    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            RateQuery::Domestic {
                from_postcode,
                to_postcode,
                parcel,
            } => vec![
                ("from_postcode", from_postcode.clone()),
                ("to_postcode", to_postcode.clone()),
                ("length", parcel.length_cm.to_string()),
                ("width", parcel.width_cm.to_string()),
                ("height", parcel.height_cm.to_string()),
                ("weight", format_kg(parcel)),
            ],
            RateQuery::International {
                country_code,
                parcel,
            } => vec![
                ("country_code", country_code.clone()),
                ("weight", format_kg(parcel)),
            ],
        }
    }
}

/// Kilograms with a `.` separator and no trailing zeros, e.g. `1.2`.
fn format_kg(parcel: &ParcelDescriptor) -> String {
    parcel.weight_kg.normalize().to_string()
}

/// One call's view of the PAC API: shared HTTP client plus the settings
/// passed in for that call.
pub struct AuspostClient<'a> {
    client: &'a Client,
    api_key: &'a str,
    base_url: Url,
    timeout: Duration,
}

impl<'a> AuspostClient<'a> {
    /// Builds a client for one quote from the shared `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidEndpoint`] if `settings.api_base_url` is
    /// not a valid URL.
    pub fn new(client: &'a Client, settings: &'a CarrierSettings) -> Result<Self, QuoteError> {
        // Exactly one trailing slash, so joining keeps any path prefix.
        let normalised = format!("{}/", settings.api_base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| QuoteError::InvalidEndpoint {
            url: settings.api_base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: &settings.api_key,
            base_url,
            timeout: Duration::from_secs(settings.request_timeout_secs),
        })
    }

    /// Builds the full request URL with percent-encoded query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidEndpoint`] if the endpoint path cannot be
    /// joined onto the base URL.
    pub fn build_url(&self, query: &RateQuery) -> Result<Url, QuoteError> {
        let mut url = self
            .base_url
            .join(query.path())
            .map_err(|e| QuoteError::InvalidEndpoint {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query.params() {
                pairs.append_pair(k, &v);
            }
        }
        Ok(url)
    }

    /// Sends the rate request and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::InvalidEndpoint`] if the URL cannot be built.
    /// - [`QuoteError::Unavailable`] on network failure, timeout, or an
    ///   unreadable body.
    pub async fn fetch_rates(&self, query: &RateQuery) -> Result<String, QuoteError> {
        let url = self.build_url(query)?;
        tracing::debug!(endpoint = query.path(), "requesting Australia Post rates");

        let response = self
            .client
            .get(url)
            .header(AUTH_KEY_HEADER, self.api_key)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                endpoint = query.path(),
                "Australia Post returned non-success status; reading error body"
            );
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn parcel() -> ParcelDescriptor {
        ParcelDescriptor {
            length_cm: 11,
            width_cm: 10,
            height_cm: 5,
            weight_kg: Decimal::new(123, 2),
            package_count: 1,
        }
    }

    fn domestic() -> RateQuery {
        RateQuery::Domestic {
            from_postcode: "3000".to_owned(),
            to_postcode: "2000".to_owned(),
            parcel: parcel(),
        }
    }

    #[test]
    fn build_url_for_domestic_query() {
        let http = Client::new();
        let settings = CarrierSettings::new("test-key");
        let client = AuspostClient::new(&http, &settings).unwrap();
        let url = client.build_url(&domestic()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://digitalapi.auspost.com.au/postage/parcel/domestic/service.json\
             ?from_postcode=3000&to_postcode=2000&length=11&width=10&height=5&weight=1.23"
        );
    }

    #[test]
    fn build_url_for_international_query() {
        let http = Client::new();
        let settings = CarrierSettings::new("test-key");
        let client = AuspostClient::new(&http, &settings).unwrap();
        let query = RateQuery::International {
            country_code: "NZ".to_owned(),
            parcel: ParcelDescriptor {
                weight_kg: Decimal::new(50, 2),
                ..parcel()
            },
        };
        let url = client.build_url(&query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://digitalapi.auspost.com.au/postage/parcel/international/service.json\
             ?country_code=NZ&weight=0.5"
        );
    }

    #[test]
    fn build_url_keeps_base_path_prefix() {
        let http = Client::new();
        let settings = CarrierSettings::new("k").with_api_base_url("http://localhost:8080/pac/");
        let client = AuspostClient::new(&http, &settings).unwrap();
        let url = client.build_url(&domestic()).unwrap();
        assert!(
            url.as_str()
                .starts_with("http://localhost:8080/pac/postage/parcel/domestic/service.json?"),
            "unexpected url: {url}"
        );
    }

    #[test]
    fn build_url_encodes_postcodes() {
        let http = Client::new();
        let settings = CarrierSettings::new("k");
        let client = AuspostClient::new(&http, &settings).unwrap();
        let query = RateQuery::Domestic {
            from_postcode: "30 00&x".to_owned(),
            to_postcode: "2000".to_owned(),
            parcel: parcel(),
        };
        let url = client.build_url(&query).unwrap();
        assert!(
            url.as_str().contains("from_postcode=30+00%26x"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let http = Client::new();
        let settings = CarrierSettings::new("k").with_api_base_url("not a url");
        let result = AuspostClient::new(&http, &settings);
        assert!(matches!(result, Err(QuoteError::InvalidEndpoint { .. })));
    }
}
