//! Simulation controller.

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, info};

use transfercore_common::{Account, AccountId, Currency, TransferError};
use transfercore_engine::{TransferEngine, TransferRequest};
use transfercore_store::InMemoryAccountStore;

use crate::metrics::SimulationMetrics;
use crate::seed::AccountFactory;

/// Largest single transfer, in whole units of the sender's currency.
const MAX_TRANSFER_UNITS: i64 = 10;

/// Probability of asserting a random (possibly wrong) request currency, to
/// exercise the mismatch rejection path.
const WRONG_CURRENCY_RATE: f64 = 0.05;

/// Drives concurrent random transfers against one shared store.
pub struct SimulationController {
    engine: Arc<TransferEngine>,
    store: Arc<InMemoryAccountStore>,
    /// Seeded account ids with their currencies, fixed for the run.
    catalog: Arc<Vec<(AccountId, Currency)>>,
    metrics: Arc<RwLock<SimulationMetrics>>,
    seed: Option<u64>,
}

impl SimulationController {
    /// Seed the store and build the controller.
    pub fn new(account_count: usize, initial_units: i64, seed: Option<u64>) -> Self {
        let store = Arc::new(InMemoryAccountStore::new());

        let accounts = AccountFactory::create_accounts(account_count, initial_units);
        let catalog: Vec<_> = accounts.iter().map(|a| (a.id, a.currency)).collect();
        for account in accounts {
            info!(
                account = %account.id,
                name = %account.name,
                balance = %account.balance,
                currency = %account.currency,
                "Seeded account"
            );
            store.insert(account);
        }

        Self {
            engine: Arc::new(TransferEngine::new(store.clone())),
            store,
            catalog: Arc::new(catalog),
            metrics: Arc::new(RwLock::new(SimulationMetrics::new())),
            seed,
        }
    }

    /// Run `transfers` random transfers across `workers` concurrent tasks.
    pub async fn run(&self, transfers: u64, workers: usize) -> anyhow::Result<()> {
        anyhow::ensure!(workers > 0, "need at least one worker");
        anyhow::ensure!(self.catalog.len() >= 2, "need at least two accounts");

        info!(transfers, workers, "Starting simulation");

        let per_worker = transfers / workers as u64;
        let remainder = transfers % workers as u64;

        let mut tasks = Vec::with_capacity(workers);
        for worker in 0..workers {
            let engine = self.engine.clone();
            let catalog = self.catalog.clone();
            let metrics = self.metrics.clone();
            let count = per_worker + u64::from((worker as u64) < remainder);
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker as u64)),
                None => StdRng::from_entropy(),
            };

            tasks.push(tokio::spawn(async move {
                for _ in 0..count {
                    let request = random_request(&mut rng, &catalog);
                    let started = Instant::now();
                    let result = engine.transfer(&request).await;
                    let elapsed_us = started.elapsed().as_micros() as u64;

                    let mut metrics = metrics.write().await;
                    match result {
                        Ok(receipt) => {
                            debug!(transfer_id = %receipt.id, "Committed");
                            metrics.record_commit(elapsed_us);
                        }
                        Err(TransferError::ConcurrentModification(account)) => {
                            debug!(account = %account, "Conflict");
                            metrics.record_conflict();
                        }
                        Err(err) => {
                            debug!(code = err.error_code(), "Rejected");
                            metrics.record_rejection();
                        }
                    }
                }
            }));
        }

        for task in tasks {
            task.await?;
        }

        info!("Simulation complete");
        Ok(())
    }

    /// Snapshot of the collected metrics.
    pub async fn metrics(&self) -> SimulationMetrics {
        self.metrics.read().await.clone()
    }

    /// Final account states, sorted by id.
    pub fn final_accounts(&self) -> Vec<Account> {
        self.store.snapshot()
    }

    /// Assert the core balance invariant over the whole population.
    pub fn verify_no_negative_balances(&self) -> anyhow::Result<()> {
        for account in self.store.snapshot() {
            anyhow::ensure!(
                account.balance >= Decimal::ZERO,
                "account {} went negative: {}",
                account.id,
                account.balance
            );
        }
        Ok(())
    }
}

/// Pick a random transfer between two distinct seeded accounts.
fn random_request(rng: &mut StdRng, catalog: &[(AccountId, Currency)]) -> TransferRequest {
    let from_idx = rng.gen_range(0..catalog.len());
    let mut to_idx = rng.gen_range(0..catalog.len());
    while to_idx == from_idx {
        to_idx = rng.gen_range(0..catalog.len());
    }

    let (from_account, from_currency) = catalog[from_idx];
    let (to_account, _) = catalog[to_idx];

    let currency = if rng.gen_bool(WRONG_CURRENCY_RATE) {
        Currency::ALL[rng.gen_range(0..Currency::ALL.len())]
    } else {
        from_currency
    };

    let max_minor = MAX_TRANSFER_UNITS * 10i64.pow(currency.decimal_places());
    let amount = Decimal::new(rng.gen_range(1..=max_minor), currency.decimal_places());

    TransferRequest::new(from_account, to_account, amount, currency)
}
