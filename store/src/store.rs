//! The account store interface.

use async_trait::async_trait;
use thiserror::Error;

use transfercore_common::{Account, AccountId};

/// Storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not serve the request. A database-backed
    /// implementation surfaces connection and query failures here.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A conditional write referenced an account id that does not exist.
    /// Conditional writes never create records; provisioning is a separate
    /// path.
    #[error("Account {0} does not exist in the store")]
    MissingAccount(AccountId),
}

/// Outcome of a single conditional write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The write committed; the stored version advanced to `new_version`.
    Committed { new_version: u64 },
    /// The stored version no longer matches the expected one.
    Conflict { stored_version: u64 },
}

/// Outcome of a two-account conditional write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairOutcome {
    /// Both accounts committed.
    Committed,
    /// Neither account committed; `account_id` is the first account whose
    /// version had moved.
    Conflict { account_id: AccountId },
}

/// Transactional key-value storage for accounts.
///
/// Writes are conditional on the version observed at read time: the store
/// commits only if the stored version still matches, advancing it on
/// success. `conditional_save_pair` extends the check to two records and
/// commits both or neither; independent single-record writes are not
/// assumed to compose into an atomic pair.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch an account by id.
    async fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Conditionally write one account.
    ///
    /// The stored version must equal `expected_version`; on commit the
    /// account is stored with the version advanced by one. The record must
    /// already exist: a missing id is `StoreError::MissingAccount`, never
    /// an implicit insert.
    async fn conditional_save(
        &self,
        account: &Account,
        expected_version: u64,
    ) -> Result<SaveOutcome, StoreError>;

    /// Conditionally write two accounts atomically.
    ///
    /// Both version checks must pass before either record is touched. No
    /// reader ever observes one half of the pair committed without the
    /// other.
    async fn conditional_save_pair(
        &self,
        first: &Account,
        first_expected: u64,
        second: &Account,
        second_expected: u64,
    ) -> Result<PairOutcome, StoreError>;
}
