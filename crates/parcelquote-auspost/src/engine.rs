//! The rate quote engine: validate, measure, split, request, parse, price.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parcelquote_core::{
    CarrierSettings, CountryLookup, CurrencyConverter, MeasureConverter, QuoteResponse,
    ShipmentRequest, ShippingOption,
};
use reqwest::Client;

use crate::client::{AuspostClient, RateQuery};
use crate::error::QuoteError;
use crate::parcel::{measure_shipment, split_packages};
use crate::pricing::{apply_handling_charge, price_services};
use crate::types::ParsedResponse;
use crate::validate::validate_request;

/// Step a quote is in, reported on log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStage {
    Validating,
    Normalizing,
    Splitting,
    Requesting,
    Parsing,
    Finalizing,
}

impl fmt::Display for QuoteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuoteStage::Validating => "validating",
            QuoteStage::Normalizing => "normalizing",
            QuoteStage::Splitting => "splitting",
            QuoteStage::Requesting => "requesting",
            QuoteStage::Parsing => "parsing",
            QuoteStage::Finalizing => "finalizing",
        };
        f.write_str(name)
    }
}

/// Computes Australia Post shipping options for a shipment.
///
/// Holds the shared HTTP client and the host's read-only collaborators; all
/// per-store configuration arrives with each call as [`CarrierSettings`].
/// Calls are independent and may run concurrently.
pub struct RateQuoteEngine {
    http: Client,
    measures: Arc<dyn MeasureConverter>,
    currencies: Arc<dyn CurrencyConverter>,
    countries: Arc<dyn CountryLookup>,
}

impl RateQuoteEngine {
    /// Creates an engine around the host's collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Unavailable`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        measures: Arc<dyn MeasureConverter>,
        currencies: Arc<dyn CurrencyConverter>,
        countries: Arc<dyn CountryLookup>,
    ) -> Result<Self, QuoteError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent("parcelquote/0.1 (rate-quote)")
            .build()?;
        Ok(Self {
            http,
            measures,
            currencies,
            countries,
        })
    }

    /// Quotes `request` and folds any failure into [`QuoteResponse::errors`].
    ///
    /// On success the response carries only options; on failure it carries a
    /// single user-visible message and no options.
    pub async fn get_shipping_options(
        &self,
        request: &ShipmentRequest,
        settings: &CarrierSettings,
    ) -> QuoteResponse {
        match self.quote(request, settings).await {
            Ok(options) => QuoteResponse::from_options(options),
            Err(err) => {
                match &err {
                    QuoteError::Validation(_) | QuoteError::Carrier(_) => {
                        tracing::warn!(error = %err, "shipping quote rejected");
                    }
                    _ => tracing::error!(error = %err, "shipping quote failed"),
                }
                QuoteResponse::from_error(err.user_message())
            }
        }
    }

    /// Quotes `request`, returning the typed error on failure.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::Validation`] before any network call if the request is
    ///   incomplete.
    /// - [`QuoteError::MeasureUnitMissing`] if grams or millimetres are not
    ///   configured.
    /// - [`QuoteError::InvalidLimits`] if the carrier limits have a zero
    ///   maximum or a minimum above its maximum.
    /// - [`QuoteError::MeasurementOverflow`] if the shipment is too large to
    ///   measure.
    /// - [`QuoteError::Unavailable`] on network failure or timeout.
    /// - [`QuoteError::Carrier`] if the carrier returned an error message.
    /// - [`QuoteError::InvalidResponse`] if the body is empty or unrecognised.
    /// - [`QuoteError::Currency`] if a carrier price cannot be converted.
    pub async fn quote(
        &self,
        request: &ShipmentRequest,
        settings: &CarrierSettings,
    ) -> Result<Vec<ShippingOption>, QuoteError> {
        let mut stage = QuoteStage::Validating;
        let result = self.run(request, settings, &mut stage).await;
        if let Err(err) = &result {
            tracing::debug!(%stage, error = %err, "quote stopped");
        }
        result
    }

    async fn run(
        &self,
        request: &ShipmentRequest,
        settings: &CarrierSettings,
        stage: &mut QuoteStage,
    ) -> Result<Vec<ShippingOption>, QuoteError> {
        let route = validate_request(request, self.countries.as_ref())?;
        let is_domestic = settings.is_domestic(&route.country_code);

        *stage = QuoteStage::Normalizing;
        settings.limits.validate()?;
        let measured = measure_shipment(request, self.measures.as_ref(), &settings.limits)?;

        *stage = QuoteStage::Splitting;
        let parcel = split_packages(measured, &settings.limits, is_domestic);
        let descriptor = parcel.descriptor();
        tracing::debug!(
            country = %route.country_code,
            is_domestic,
            package_count = descriptor.package_count,
            weight_kg = %descriptor.weight_kg,
            length_cm = descriptor.length_cm,
            width_cm = descriptor.width_cm,
            height_cm = descriptor.height_cm,
            "parcel normalized"
        );

        *stage = QuoteStage::Requesting;
        let query = if is_domestic {
            RateQuery::Domestic {
                from_postcode: route.origin_zip,
                to_postcode: route.destination_zip,
                parcel: descriptor,
            }
        } else {
            RateQuery::International {
                country_code: route.country_code,
                parcel: descriptor,
            }
        };
        let body = AuspostClient::new(&self.http, settings)?
            .fetch_rates(&query)
            .await?;

        *stage = QuoteStage::Parsing;
        let services = match ParsedResponse::from_body(&body) {
            ParsedResponse::Services(services) => services,
            ParsedResponse::Error(message) => return Err(QuoteError::Carrier(message)),
            ParsedResponse::Malformed(reason) => {
                return Err(QuoteError::InvalidResponse { reason });
            }
        };
        let mut options =
            price_services(services, descriptor.package_count, self.currencies.as_ref())?;

        *stage = QuoteStage::Finalizing;
        apply_handling_charge(&mut options, settings.additional_handling_charge);
        tracing::debug!(options = options.len(), "shipping options priced");

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_are_lowercase() {
        assert_eq!(QuoteStage::Requesting.to_string(), "requesting");
        assert_eq!(QuoteStage::Finalizing.to_string(), "finalizing");
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RateQuoteEngine>();
    }
}
