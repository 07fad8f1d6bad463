//! Transfer request and receipt types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use transfercore_common::{AccountId, Currency, TransferId};

/// A request to move funds between two accounts.
///
/// Constructed per call and never persisted. The currency is asserted by
/// the caller and must match the sender account's base currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Account funds are drawn from.
    pub from_account: AccountId,
    /// Account funds are credited to.
    pub to_account: AccountId,
    /// Amount to transfer, in the sender's currency.
    pub amount: Decimal,
    /// Currency the caller believes the transfer is denominated in.
    pub currency: Currency,
}

impl TransferRequest {
    /// Create a new transfer request.
    pub fn new(
        from_account: AccountId,
        to_account: AccountId,
        amount: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            from_account,
            to_account,
            amount,
            currency,
        }
    }
}

/// Record of a committed transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Unique transfer ID.
    pub id: TransferId,
    /// Source account.
    pub from_account: AccountId,
    /// Destination account.
    pub to_account: AccountId,
    /// Total debited from the source (amount plus fee), in the source
    /// currency.
    pub debited: Decimal,
    /// Fee portion of the debit, in the source currency.
    pub fee: Decimal,
    /// Amount credited to the destination, in the destination currency.
    pub credited: Decimal,
    /// Source account currency.
    pub from_currency: Currency,
    /// Destination account currency.
    pub to_currency: Currency,
    /// When the transfer committed.
    pub executed_at: DateTime<Utc>,
}

impl TransferReceipt {
    /// Confirmation message naming the source and destination currencies.
    pub fn message(&self) -> String {
        format!(
            "Transfer successful from {} to {}.",
            self.from_currency, self.to_currency
        )
    }
}
