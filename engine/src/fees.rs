//! The transfer fee policy.

use rust_decimal::Decimal;

use transfercore_common::Money;

/// Computes the flat-rate transfer fee.
///
/// The fee is always priced in the sender's currency, before any
/// conversion, and rounded half-up to that currency's canonical scale.
/// Pure arithmetic: no side effects, never fails.
#[derive(Debug, Clone)]
pub struct FeePolicy {
    rate: Decimal,
}

impl FeePolicy {
    /// Create a policy with an explicit fee rate (e.g. 0.01 for 1%).
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    /// The configured fee rate.
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Compute the fee for a transfer amount.
    pub fn fee(&self, amount: &Money) -> Money {
        (amount.clone() * self.rate).round()
    }
}

impl Default for FeePolicy {
    /// The reference policy: 1% of the transfer amount.
    fn default() -> Self {
        Self {
            rate: Decimal::new(1, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use transfercore_common::{round_half_up, Currency};

    #[test]
    fn test_reference_fee() {
        let policy = FeePolicy::default();

        let fee = policy.fee(&Money::new(dec!(50.00), Currency::Usd));
        assert_eq!(fee, Money::new(dec!(0.50), Currency::Usd));

        let fee = policy.fee(&Money::new(dec!(100.00), Currency::Aud));
        assert_eq!(fee, Money::new(dec!(1.00), Currency::Aud));
    }

    #[test]
    fn test_fee_rounds_to_currency_scale() {
        let policy = FeePolicy::default();

        // 1% of 0.49 is 0.0049, which rounds to the smallest USD unit.
        let fee = policy.fee(&Money::new(dec!(0.49), Currency::Usd));
        assert_eq!(fee.value, dec!(0.00));

        let fee = policy.fee(&Money::new(dec!(0.50), Currency::Usd));
        assert_eq!(fee.value, dec!(0.01));

        // Zero-decimal currency: 1% of 50 JPN is 0.5, rounded up to 1.
        let fee = policy.fee(&Money::new(dec!(50), Currency::Jpn));
        assert_eq!(fee.value, dec!(1));
    }

    proptest! {
        #[test]
        fn prop_fee_is_rounded_product(
            minor_units in 1i64..1_000_000_000,
            currency in prop::sample::select(Currency::ALL.to_vec()),
        ) {
            let policy = FeePolicy::default();
            let amount = Money::new(
                Decimal::new(minor_units, currency.decimal_places()),
                currency,
            );

            let fee = policy.fee(&amount);
            let expected = round_half_up(
                amount.value * dec!(0.01),
                currency.decimal_places(),
            );

            prop_assert_eq!(fee.value, expected);
            prop_assert_eq!(fee.currency, currency);
            prop_assert!(!fee.is_negative());
        }
    }
}
