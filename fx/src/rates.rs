//! The fixed rate table.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use transfercore_common::Currency;

/// The intermediary base currency all conversions route through.
pub const BASE_CURRENCY: Currency = Currency::Usd;

/// Fixed conversion rates relative to the base currency.
///
/// Each entry is units-of-currency per 1 unit of base: dividing an amount
/// by its own rate yields base units, multiplying base units by the target
/// rate yields the target currency. The table is immutable at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    rates: HashMap<Currency, Decimal>,
}

impl RateTable {
    /// Build a table from explicit per-currency rates.
    pub fn new(rates: HashMap<Currency, Decimal>) -> Self {
        Self { rates }
    }

    /// Get the units-per-base rate for a currency, if configured.
    pub fn units_per_base(&self, currency: Currency) -> Option<Decimal> {
        self.rates.get(&currency).copied()
    }

    /// Check whether a currency can be priced by this table.
    pub fn supports(&self, currency: Currency) -> bool {
        self.rates
            .get(&currency)
            .is_some_and(|rate| *rate > Decimal::ZERO)
    }
}

impl Default for RateTable {
    /// The reference configuration: 1 USD = 2 AUD = 110 JPN = 7 CNY.
    fn default() -> Self {
        let mut rates = HashMap::new();
        rates.insert(Currency::Usd, Decimal::ONE);
        rates.insert(Currency::Aud, Decimal::new(200, 2));
        rates.insert(Currency::Jpn, Decimal::new(110, 0));
        rates.insert(Currency::Cny, Decimal::new(7, 0));
        Self { rates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_table_covers_all_currencies() {
        let table = RateTable::default();
        for currency in Currency::ALL {
            assert!(table.supports(currency), "missing rate for {currency}");
        }
    }

    #[test]
    fn test_reference_rates() {
        let table = RateTable::default();
        assert_eq!(table.units_per_base(Currency::Usd), Some(dec!(1)));
        assert_eq!(table.units_per_base(Currency::Aud), Some(dec!(2.00)));
        assert_eq!(table.units_per_base(Currency::Jpn), Some(dec!(110)));
        assert_eq!(table.units_per_base(Currency::Cny), Some(dec!(7)));
    }

    #[test]
    fn test_zero_rate_is_unsupported() {
        let mut rates = HashMap::new();
        rates.insert(Currency::Usd, Decimal::ZERO);
        let table = RateTable::new(rates);

        assert!(!table.supports(Currency::Usd));
        assert!(!table.supports(Currency::Aud));
    }
}
