//! Australia Post shipping rate quotes for a checkout pipeline.

pub mod client;
pub mod engine;
pub mod error;
pub mod parcel;
pub mod pricing;
pub mod tracking;
pub mod types;
pub mod validate;

pub use client::{AuspostClient, RateQuery};
pub use engine::{QuoteStage, RateQuoteEngine};
pub use error::{QuoteError, ValidationError};
pub use parcel::{NormalizedParcel, ParcelDescriptor};
pub use tracking::tracking_url;
pub use types::{ParsedResponse, Service};
