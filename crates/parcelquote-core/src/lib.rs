//! Domain types and host collaborators shared by the carrier rate-quote crates.

pub mod config;
pub mod country;
pub mod currency;
pub mod error;
pub mod limits;
pub mod measure;
pub mod settings;
pub mod shipment;

pub use config::{build_carrier_settings, load_carrier_settings, load_carrier_settings_from_env};
pub use country::{CountryLookup, CountryTable};
pub use currency::{CurrencyConverter, ExchangeRateTable};
pub use error::{ConfigError, CurrencyError, LimitsError};
pub use limits::CarrierServiceLimits;
pub use measure::{MeasureCatalog, MeasureConverter, MeasureUnit};
pub use settings::CarrierSettings;
pub use shipment::{LineItem, QuoteResponse, ShipmentRequest, ShippingAddress, ShippingOption};
