//! The account model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::identifiers::AccountId;

/// A ledger account.
///
/// Accounts are owned by the storage layer. The engine only ever sees
/// transient copies: it mutates a copy locally and submits it back through
/// the store's conditional write, keyed by the version the copy was read at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,
    /// Display name of the account holder.
    pub name: String,
    /// Current balance, always non-negative after a committed transfer.
    pub balance: Decimal,
    /// Currency the account is denominated in.
    pub currency: Currency,
    /// Version counter for optimistic concurrency. Advanced by the store
    /// on every committed write.
    pub version: u64,
}

impl Account {
    /// Create a new account at version 0.
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        balance: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            currency,
            version: 0,
        }
    }

    /// Check whether the balance covers the given amount.
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    /// Reduce the balance on this copy. The caller validates funds first;
    /// nothing is visible to other callers until the copy is committed.
    pub fn debit(&mut self, amount: Decimal) {
        self.balance -= amount;
    }

    /// Increase the balance on this copy.
    pub fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
    }
}
