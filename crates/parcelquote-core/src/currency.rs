//! Conversion of carrier-quoted prices into the store's primary currency.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::CurrencyError;

/// Converts amounts quoted in a foreign currency into the store's
/// primary currency.
pub trait CurrencyConverter: Send + Sync {
    /// ISO 4217 code of the store's primary currency.
    fn primary_currency_code(&self) -> &str;

    /// Converts `amount`, quoted in `currency_code`, to the primary currency.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError`] if no usable rate is known for `currency_code`.
    fn to_primary_store_currency(
        &self,
        amount: Decimal,
        currency_code: &str,
    ) -> Result<Decimal, CurrencyError>;
}

/// Exchange-rate table keyed by ISO 4217 code.
///
/// A rate is the number of units of that currency per one unit of the
/// primary currency, so converting to primary divides by the rate.
#[derive(Debug, Clone)]
pub struct ExchangeRateTable {
    primary: String,
    rates: HashMap<String, Decimal>,
}

impl ExchangeRateTable {
    #[must_use]
    pub fn new(primary_currency_code: &str) -> Self {
        Self {
            primary: primary_currency_code.to_uppercase(),
            rates: HashMap::new(),
        }
    }

    /// Adds or replaces the rate for `code`.
    #[must_use]
    pub fn with_rate(mut self, code: &str, rate: Decimal) -> Self {
        self.rates.insert(code.to_uppercase(), rate);
        self
    }
}

impl CurrencyConverter for ExchangeRateTable {
    fn primary_currency_code(&self) -> &str {
        &self.primary
    }

    fn to_primary_store_currency(
        &self,
        amount: Decimal,
        currency_code: &str,
    ) -> Result<Decimal, CurrencyError> {
        let code = currency_code.to_uppercase();
        if code == self.primary {
            return Ok(amount);
        }

        let rate = *self
            .rates
            .get(&code)
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.clone()))?;
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::InvalidRate { code, rate });
        }

        Ok(amount / rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_currency_passes_through() {
        let table = ExchangeRateTable::new("aud");
        let amount = table
            .to_primary_store_currency(Decimal::new(1615, 2), "AUD")
            .unwrap();
        assert_eq!(amount, Decimal::new(1615, 2));
        assert_eq!(table.primary_currency_code(), "AUD");
    }

    #[test]
    fn foreign_currency_divides_by_rate() {
        let table = ExchangeRateTable::new("USD").with_rate("AUD", Decimal::new(15, 1));
        let amount = table
            .to_primary_store_currency(Decimal::from(30), "aud")
            .unwrap();
        assert_eq!(amount, Decimal::from(20));
    }

    #[test]
    fn unknown_currency_fails() {
        let table = ExchangeRateTable::new("USD");
        let err = table
            .to_primary_store_currency(Decimal::ONE, "AUD")
            .unwrap_err();
        assert!(matches!(err, CurrencyError::UnknownCurrency(ref c) if c == "AUD"));
    }

    #[test]
    fn zero_rate_fails() {
        let table = ExchangeRateTable::new("USD").with_rate("AUD", Decimal::ZERO);
        let err = table
            .to_primary_store_currency(Decimal::ONE, "AUD")
            .unwrap_err();
        assert!(matches!(err, CurrencyError::InvalidRate { .. }));
    }
}
