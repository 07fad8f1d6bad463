//! The transfer execution engine.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use transfercore_common::{
    Account, AccountId, AccountSide, Money, Result, TransferError, TransferId,
};
use transfercore_fx::CurrencyConverter;
use transfercore_store::{AccountStore, PairOutcome};

use crate::fees::FeePolicy;
use crate::request::{TransferReceipt, TransferRequest};

/// Orchestrates transfers between two accounts.
///
/// The engine holds no mutable state of its own: every transfer works on
/// private copies of the accounts and publishes them through the store's
/// conditional write, keyed by the versions observed at read time. Two
/// transfers over disjoint account pairs proceed fully in parallel; an
/// overlapping pair races on the version check and the loser aborts whole.
pub struct TransferEngine {
    store: Arc<dyn AccountStore>,
    converter: CurrencyConverter,
    fees: FeePolicy,
}

impl TransferEngine {
    /// Create an engine with the reference conversion table and fee policy.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self::with_policies(store, CurrencyConverter::default(), FeePolicy::default())
    }

    /// Create an engine with explicit policies.
    pub fn with_policies(
        store: Arc<dyn AccountStore>,
        converter: CurrencyConverter,
        fees: FeePolicy,
    ) -> Self {
        Self {
            store,
            converter,
            fees,
        }
    }

    /// Execute a transfer.
    ///
    /// Validation fully precedes mutation: any failure before the commit
    /// step leaves both accounts untouched, and a commit conflict leaves no
    /// partial write. A `ConcurrentModification` result is the caller's cue
    /// to re-read and retry; the engine never retries internally.
    #[instrument(skip(self, request), fields(
        from = %request.from_account,
        to = %request.to_account,
        amount = %request.amount,
        currency = %request.currency,
    ))]
    pub async fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt> {
        if request.amount <= Decimal::ZERO {
            return Err(TransferError::NonPositiveAmount(request.amount));
        }
        // Sub-canonical amounts would be silently reshaped by rounding; the
        // debit must match the request digit for digit.
        if request.amount.normalize().scale() > request.currency.decimal_places() {
            return Err(TransferError::PrecisionExceeded {
                amount: request.amount,
                currency: request.currency,
            });
        }
        if request.from_account == request.to_account {
            return Err(TransferError::SameAccount(request.from_account));
        }

        let mut from = self.load(request.from_account, AccountSide::Source).await?;
        let mut to = self.load(request.to_account, AccountSide::Destination).await?;
        let from_version = from.version;
        let to_version = to.version;

        // Transfers may only be initiated in the sender's base currency.
        if request.currency != from.currency {
            return Err(TransferError::CurrencyMismatch {
                expected: from.currency,
                requested: request.currency,
            });
        }

        let amount = Money::new(request.amount, from.currency);
        let fee = self.fees.fee(&amount);
        let total_deduction = amount.value + fee.value;

        if !from.can_cover(total_deduction) {
            return Err(TransferError::InsufficientFunds {
                required: total_deduction,
                available: from.balance,
            });
        }

        let credit = self.converter.convert(&amount, to.currency)?;

        from.debit(total_deduction);
        to.credit(credit.value);

        let outcome = self
            .store
            .conditional_save_pair(&from, from_version, &to, to_version)
            .await
            .map_err(|e| TransferError::Storage(e.to_string()))?;

        if let PairOutcome::Conflict { account_id } = outcome {
            warn!(account = %account_id, "Commit rejected by version check");
            return Err(TransferError::ConcurrentModification(account_id));
        }

        let receipt = TransferReceipt {
            id: TransferId::new(),
            from_account: from.id,
            to_account: to.id,
            debited: total_deduction,
            fee: fee.value,
            credited: credit.value,
            from_currency: from.currency,
            to_currency: to.currency,
            executed_at: Utc::now(),
        };

        info!(
            transfer_id = %receipt.id,
            debited = %receipt.debited,
            fee = %receipt.fee,
            credited = %receipt.credited,
            "Transfer committed"
        );

        Ok(receipt)
    }

    /// Fetch an account by id.
    pub async fn get_account(&self, id: AccountId) -> Result<Account> {
        self.load(id, AccountSide::Source).await
    }

    async fn load(&self, id: AccountId, side: AccountSide) -> Result<Account> {
        self.store
            .get(id)
            .await
            .map_err(|e| TransferError::Storage(e.to_string()))?
            .ok_or(TransferError::AccountNotFound { side, id })
    }
}
