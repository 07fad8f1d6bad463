//! TransferCore Account Store
//!
//! The storage collaborator of the transfer engine: a transactional
//! key-value view of accounts keyed by id, with version-checked conditional
//! writes for optimistic concurrency.

pub mod memory;
pub mod store;

pub use memory::InMemoryAccountStore;
pub use store::{AccountStore, PairOutcome, SaveOutcome, StoreError};
