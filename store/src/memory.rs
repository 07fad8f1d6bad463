//! In-memory account store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use transfercore_common::{Account, AccountId};

use crate::store::{AccountStore, PairOutcome, SaveOutcome, StoreError};

/// An in-memory versioned account store.
///
/// Backs tests and the simulator. The write lock is the serialization
/// point that makes the two-account commit atomic: version checks and both
/// record writes happen under one writer, so no reader observes a partial
/// pair. Reads take the shared lock and return copies.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account, replacing any existing record. Provisioning only;
    /// transfers go through the conditional writes.
    pub fn insert(&self, account: Account) {
        self.accounts.write().insert(account.id, account);
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }

    /// Copy out all accounts, for inspection.
    pub fn snapshot(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.read().values().cloned().collect();
        accounts.sort_by_key(|a| a.id);
        accounts
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().get(&id).cloned())
    }

    async fn conditional_save(
        &self,
        account: &Account,
        expected_version: u64,
    ) -> Result<SaveOutcome, StoreError> {
        let mut accounts = self.accounts.write();

        let Some(stored) = accounts.get(&account.id) else {
            return Err(StoreError::MissingAccount(account.id));
        };
        let stored_version = stored.version;
        if stored_version != expected_version {
            debug!(
                account = %account.id,
                expected = expected_version,
                stored = stored_version,
                "Conditional save rejected"
            );
            return Ok(SaveOutcome::Conflict { stored_version });
        }

        let new_version = expected_version + 1;
        let mut committed = account.clone();
        committed.version = new_version;
        accounts.insert(committed.id, committed);

        Ok(SaveOutcome::Committed { new_version })
    }

    async fn conditional_save_pair(
        &self,
        first: &Account,
        first_expected: u64,
        second: &Account,
        second_expected: u64,
    ) -> Result<PairOutcome, StoreError> {
        let mut accounts = self.accounts.write();

        // Both checks before either write.
        for (account, expected) in [(first, first_expected), (second, second_expected)] {
            let Some(stored) = accounts.get(&account.id) else {
                return Err(StoreError::MissingAccount(account.id));
            };
            let stored_version = stored.version;
            if stored_version != expected {
                debug!(
                    account = %account.id,
                    expected = expected,
                    stored = stored_version,
                    "Pair save rejected"
                );
                return Ok(PairOutcome::Conflict {
                    account_id: account.id,
                });
            }
        }

        for (account, expected) in [(first, first_expected), (second, second_expected)] {
            let mut committed = account.clone();
            committed.version = expected + 1;
            accounts.insert(committed.id, committed);
        }

        Ok(PairOutcome::Committed)
    }
}
