//! FX conversion error types.

use rust_decimal::Decimal;
use thiserror::Error;
use transfercore_common::Currency;

/// Errors that can occur during currency conversion.
#[derive(Debug, Error)]
pub enum FxError {
    /// The rate table has no entry for the currency.
    #[error("No conversion rate configured for {0}")]
    UnsupportedCurrency(Currency),

    /// The configured rate is zero or negative and cannot price anything.
    #[error("Invalid rate {rate} configured for {currency}")]
    InvalidRate { currency: Currency, rate: Decimal },
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;

impl From<FxError> for transfercore_common::TransferError {
    /// Fold conversion failures into the engine taxonomy: both kinds mean
    /// the rate table cannot price the currency.
    fn from(err: FxError) -> Self {
        match err {
            FxError::UnsupportedCurrency(currency) => Self::UnsupportedCurrency(currency),
            FxError::InvalidRate { currency, .. } => Self::UnsupportedCurrency(currency),
        }
    }
}
