//! Account seeding for simulation runs.

use rust_decimal::Decimal;

use transfercore_common::{Account, AccountId, Currency};

/// Account holder names used for seeded accounts.
const HOLDER_NAMES: [&str; 10] = [
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Ivan", "Judy",
];

/// Creates the seeded account population for a run.
pub struct AccountFactory;

impl AccountFactory {
    /// Create N accounts, cycling through the supported currencies.
    ///
    /// Each account starts with `initial_units` whole units of its own
    /// currency, expressed at the currency's canonical scale.
    pub fn create_accounts(count: usize, initial_units: i64) -> Vec<Account> {
        (0..count)
            .map(|i| {
                let currency = Currency::ALL[i % Currency::ALL.len()];
                let name = if i < HOLDER_NAMES.len() {
                    HOLDER_NAMES[i].to_string()
                } else {
                    format!("Holder {}", i + 1)
                };
                let balance = Decimal::new(
                    initial_units * 10i64.pow(currency.decimal_places()),
                    currency.decimal_places(),
                );

                Account::new(AccountId::new(i as u64 + 1), name, balance, currency)
            })
            .collect()
    }
}
