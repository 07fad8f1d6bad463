//! TransferCore Common Types
//!
//! This crate contains the types shared across the TransferCore engine:
//! identifiers, the supported currency set, monetary arithmetic, the
//! account model, and the transfer error taxonomy.

pub mod account;
pub mod currency;
pub mod error;
pub mod identifiers;
pub mod monetary;

pub use account::*;
pub use currency::*;
pub use error::*;
pub use identifiers::*;
pub use monetary::*;
