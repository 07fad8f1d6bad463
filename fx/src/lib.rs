//! TransferCore FX
//!
//! Currency conversion arithmetic over a fixed rate table.
//!
//! All cross-currency conversions route through a single intermediary base
//! currency (USD in the reference configuration). Intermediate base-unit
//! arithmetic is carried at high fixed precision; the final result is
//! rounded half-up to the target currency's canonical scale.

pub mod converter;
pub mod error;
pub mod rates;

pub use converter::CurrencyConverter;
pub use error::{FxError, FxResult};
pub use rates::RateTable;
