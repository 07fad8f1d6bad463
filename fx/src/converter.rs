//! Fixed-base conversion arithmetic.

use rust_decimal::Decimal;
use tracing::debug;

use transfercore_common::{round_half_up, Currency, Money};

use crate::error::{FxError, FxResult};
use crate::rates::RateTable;

/// Fractional digits carried for intermediate base-unit amounts. Keeps the
/// two-step conversion from compounding rounding error.
const BASE_SCALE: u32 = 10;

/// Converts amounts between supported currencies via the fixed base.
#[derive(Debug, Clone, Default)]
pub struct CurrencyConverter {
    table: RateTable,
}

impl CurrencyConverter {
    /// Create a converter over the given rate table.
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    /// Convert an amount into the target currency.
    ///
    /// Identity conversion short-circuits: no rate is applied, only scale
    /// normalization. Otherwise the amount is divided by the source
    /// currency's units-per-base rate (carried at high precision), then
    /// multiplied by the target's rate and rounded half-up to the target's
    /// canonical scale.
    pub fn convert(&self, amount: &Money, to: Currency) -> FxResult<Money> {
        if amount.currency == to {
            return Ok(amount.round());
        }

        let from_rate = self.rate(amount.currency)?;
        let to_rate = self.rate(to)?;

        let in_base = round_half_up(amount.value / from_rate, BASE_SCALE);
        let converted = Money::new(in_base * to_rate, to).round();

        debug!(
            from = %amount.currency,
            to = %to,
            input = %amount.value,
            output = %converted.value,
            "Converted amount"
        );

        Ok(converted)
    }

    /// Check whether a currency can be converted by this converter.
    pub fn supports(&self, currency: Currency) -> bool {
        self.table.supports(currency)
    }

    /// Look up a rate, rejecting missing and non-positive entries.
    fn rate(&self, currency: Currency) -> FxResult<Decimal> {
        let rate = self
            .table
            .units_per_base(currency)
            .ok_or(FxError::UnsupportedCurrency(currency))?;

        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate { currency, rate });
        }

        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn converter() -> CurrencyConverter {
        CurrencyConverter::default()
    }

    #[test]
    fn test_usd_to_jpn() {
        let out = converter()
            .convert(&Money::new(dec!(50.00), Currency::Usd), Currency::Jpn)
            .unwrap();
        assert_eq!(out, Money::new(dec!(5500), Currency::Jpn));
    }

    #[test]
    fn test_aud_to_usd() {
        // 1 AUD = 0.50 USD in the reference table.
        let out = converter()
            .convert(&Money::new(dec!(100.00), Currency::Aud), Currency::Usd)
            .unwrap();
        assert_eq!(out, Money::new(dec!(50.00), Currency::Usd));
    }

    #[test]
    fn test_cross_rate_jpn_to_cny() {
        // 1000 JPN -> 9.0909090909 USD -> 63.64 CNY.
        let out = converter()
            .convert(&Money::new(dec!(1000), Currency::Jpn), Currency::Cny)
            .unwrap();
        assert_eq!(out, Money::new(dec!(63.64), Currency::Cny));
    }

    #[test]
    fn test_identity_normalizes_scale() {
        let out = converter()
            .convert(&Money::new(dec!(10.005), Currency::Usd), Currency::Usd)
            .unwrap();
        assert_eq!(out.value, dec!(10.01));

        let out = converter()
            .convert(&Money::new(dec!(100.4), Currency::Jpn), Currency::Jpn)
            .unwrap();
        assert_eq!(out.value, dec!(100));
    }

    #[test]
    fn test_result_at_target_scale() {
        let out = converter()
            .convert(&Money::new(dec!(0.01), Currency::Usd), Currency::Jpn)
            .unwrap();
        // 0.01 USD = 1.1 JPN, rounded to the zero-decimal scale.
        assert_eq!(out.value, dec!(1));
    }

    #[test]
    fn test_missing_rate_is_rejected() {
        let mut rates = HashMap::new();
        rates.insert(Currency::Usd, dec!(1));
        let converter = CurrencyConverter::new(RateTable::new(rates));

        let result = converter.convert(&Money::new(dec!(1.00), Currency::Usd), Currency::Aud);
        assert!(matches!(result, Err(FxError::UnsupportedCurrency(Currency::Aud))));
    }

    #[test]
    fn test_round_trip_through_zero_decimal_currency() {
        // Routing through the zero-decimal JPN rounds the intermediate to a
        // whole yen, so the round trip can drift by up to one JPN expressed
        // in the source currency (7/110 CNY here), not one source cent.
        let converter = converter();

        let there = converter
            .convert(&Money::new(dec!(0.10), Currency::Cny), Currency::Jpn)
            .unwrap();
        assert_eq!(there.value, dec!(2));

        let back = converter.convert(&there, Currency::Cny).unwrap();
        assert_eq!(back.value, dec!(0.13));

        let drift = (back.value - dec!(0.10)).abs();
        let jpn_unit_in_cny = dec!(7) / dec!(110);
        assert!(drift <= jpn_unit_in_cny, "drift {drift} exceeds {jpn_unit_in_cny}");
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let mut rates = HashMap::new();
        rates.insert(Currency::Usd, dec!(1));
        rates.insert(Currency::Jpn, dec!(0));
        let converter = CurrencyConverter::new(RateTable::new(rates));

        let result = converter.convert(&Money::new(dec!(100), Currency::Jpn), Currency::Usd);
        assert!(matches!(result, Err(FxError::InvalidRate { .. })));
    }

    fn any_currency() -> impl Strategy<Value = Currency> {
        prop::sample::select(Currency::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_round_trip_within_coarsest_unit(
            minor_units in 1i64..1_000_000_000,
            from in any_currency(),
            to in any_currency(),
        ) {
            let converter = converter();
            let amount = Money::new(
                Decimal::new(minor_units, from.decimal_places()),
                from,
            );

            let there = converter.convert(&amount, to).unwrap();
            let back = converter.convert(&there, from).unwrap();

            // The round trip rounds once at each currency's scale, so the
            // drift is bounded by the coarser of one source unit and one
            // target unit expressed in the source currency.
            let table = RateTable::default();
            let from_rate = table.units_per_base(from).unwrap();
            let to_rate = table.units_per_base(to).unwrap();
            let target_unit_in_from = to.smallest_unit() * from_rate / to_rate;
            let bound = from.smallest_unit().max(target_unit_in_from);

            let drift = (back.value - amount.value).abs();
            prop_assert!(
                drift <= bound,
                "round trip {} -> {} -> {} drifted by {} (bound {})",
                amount, there, back, drift, bound
            );
        }

        #[test]
        fn prop_output_at_canonical_scale(
            minor_units in 1i64..1_000_000_000,
            from in any_currency(),
            to in any_currency(),
        ) {
            let amount = Money::new(
                Decimal::new(minor_units, from.decimal_places()),
                from,
            );

            let out = converter().convert(&amount, to).unwrap();
            prop_assert!(out.value.scale() <= to.decimal_places());
        }
    }
}
