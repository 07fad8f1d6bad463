//! The supported currency set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported currency.
///
/// The set is closed: the engine only moves funds between accounts
/// denominated in one of these four currencies. `JPN` is the zero-decimal
/// currency of the reference configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Aud,
    Jpn,
    Cny,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Aud, Currency::Jpn, Currency::Cny];

    /// Get the currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Aud => "AUD",
            Currency::Jpn => "JPN",
            Currency::Cny => "CNY",
        }
    }

    /// Get the canonical number of fractional digits for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::Jpn => 0,
            _ => 2,
        }
    }

    /// Get the smallest representable unit (0.01, or 1 for JPN).
    pub fn smallest_unit(&self) -> Decimal {
        Decimal::new(1, self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error when parsing an unknown currency code.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "AUD" => Ok(Currency::Aud),
            "JPN" => Ok(Currency::Jpn),
            "CNY" => Ok(Currency::Cny),
            other => Err(UnknownCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_places() {
        assert_eq!(Currency::Usd.decimal_places(), 2);
        assert_eq!(Currency::Aud.decimal_places(), 2);
        assert_eq!(Currency::Cny.decimal_places(), 2);
        assert_eq!(Currency::Jpn.decimal_places(), 0);
    }

    #[test]
    fn test_smallest_unit() {
        assert_eq!(Currency::Usd.smallest_unit(), dec!(0.01));
        assert_eq!(Currency::Jpn.smallest_unit(), dec!(1));
    }

    #[test]
    fn test_parse() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("JPN".parse::<Currency>().unwrap(), Currency::Jpn);
        assert!("EUR".parse::<Currency>().is_err());
    }

    #[test]
    fn test_serde_codes() {
        let json = serde_json::to_string(&Currency::Aud).unwrap();
        assert_eq!(json, "\"AUD\"");
        let back: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Currency::Aud);
    }
}
