//! TransferCore Engine
//!
//! The transfer execution engine: validates a transfer request, prices the
//! fee and the cross-currency credit, and commits both account mutations
//! through the store's version-checked conditional write.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use transfercore_engine::{TransferEngine, TransferRequest};
//! use transfercore_store::InMemoryAccountStore;
//!
//! let store = Arc::new(InMemoryAccountStore::new());
//! let engine = TransferEngine::new(store);
//!
//! let receipt = engine.transfer(&TransferRequest::new(
//!     alice_id, bob_id, amount, currency,
//! )).await?;
//! println!("{}", receipt.message());
//! ```

pub mod engine;
pub mod fees;
pub mod request;

pub use engine::TransferEngine;
pub use fees::FeePolicy;
pub use request::{TransferReceipt, TransferRequest};
