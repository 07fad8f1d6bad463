//! Error taxonomy for transfer operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::currency::Currency;
use crate::identifiers::AccountId;

/// Which side of a transfer an account sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountSide {
    /// The account funds are drawn from.
    Source,
    /// The account funds are credited to.
    Destination,
}

impl fmt::Display for AccountSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountSide::Source => write!(f, "source"),
            AccountSide::Destination => write!(f, "destination"),
        }
    }
}

/// Main error type for transfer operations.
///
/// Every failure aborts the transfer with zero observable mutation to
/// either account: validation fully precedes mutation, and mutation is only
/// ever submitted through the store's conditional write.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Referenced account does not exist in the store.
    #[error("{side} account not found: {id}")]
    AccountNotFound { side: AccountSide, id: AccountId },

    /// Request currency does not match the sender account's base currency.
    #[error("Transfer currency {requested} does not match sender account currency {expected}")]
    CurrencyMismatch {
        expected: Currency,
        requested: Currency,
    },

    /// Sender balance cannot cover amount plus fee.
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    /// Transfer amount must be strictly positive.
    #[error("Transfer amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Transfer amount carries more fractional digits than the currency's
    /// canonical scale.
    #[error("Amount {amount} exceeds the canonical scale of {currency}")]
    PrecisionExceeded { amount: Decimal, currency: Currency },

    /// Source and destination are the same account.
    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(AccountId),

    /// Version conflict on commit: a concurrent transfer already committed
    /// against this account since it was read.
    #[error("Account {0} was modified concurrently")]
    ConcurrentModification(AccountId),

    /// A conversion involved a currency the rate table cannot price.
    #[error("Unsupported currency for conversion: {0}")]
    UnsupportedCurrency(Currency),

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TransferError {
    /// Check if this error is retryable.
    ///
    /// Only a commit conflict is worth retrying: the caller re-reads the
    /// account pair and resubmits. Every other kind is deterministic for
    /// the same input and account state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransferError::ConcurrentModification(_))
    }

    /// Get a stable error code for host-service surfaces.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransferError::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            TransferError::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            TransferError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            TransferError::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            TransferError::PrecisionExceeded { .. } => "PRECISION_EXCEEDED",
            TransferError::SameAccount(_) => "SAME_ACCOUNT",
            TransferError::ConcurrentModification(_) => "CONCURRENT_MODIFICATION",
            TransferError::UnsupportedCurrency(_) => "UNSUPPORTED_CURRENCY",
            TransferError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Result type alias for transfer operations.
pub type Result<T> = std::result::Result<T, TransferError>;
