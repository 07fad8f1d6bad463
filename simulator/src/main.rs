//! TransferCore Simulator
//!
//! Load driver for the transfer engine: seeds an in-memory account
//! population and hammers it with concurrent random transfers, reporting
//! commit, conflict, and rejection counts.

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod controller;
mod metrics;
mod seed;

use controller::SimulationController;

/// TransferCore Simulator CLI
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "TransferCore load and race simulation environment")]
struct Args {
    /// Number of seeded accounts
    #[arg(short, long, default_value = "8")]
    accounts: usize,

    /// Initial balance per account, in whole units of its currency
    #[arg(long, default_value = "10000")]
    initial_units: i64,

    /// Total number of transfers to attempt
    #[arg(short, long, default_value = "1000")]
    transfers: u64,

    /// Number of concurrent worker tasks
    #[arg(short, long, default_value = "4")]
    workers: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the summary as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting TransferCore Simulator");
    info!("Accounts: {}", args.accounts);
    info!("Transfers: {} across {} workers", args.transfers, args.workers);

    let controller = SimulationController::new(args.accounts, args.initial_units, args.seed);

    controller.run(args.transfers, args.workers).await?;
    controller.verify_no_negative_balances()?;

    let metrics = controller.metrics().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metrics.summary())?);
    } else {
        info!("Simulation complete");
        info!("Total transfers: {}", metrics.total_transfers);
        info!("Committed: {}", metrics.committed);
        info!("Conflicts: {}", metrics.conflicts);
        info!("Rejected: {}", metrics.rejected);
        info!("Commit rate: {:.1}%", metrics.commit_rate() * 100.0);
        info!(
            "Latency avg/p50/p99: {}/{}/{} us",
            metrics.average_latency_us(),
            metrics.p50_latency_us(),
            metrics.p99_latency_us()
        );

        for account in controller.final_accounts() {
            info!(
                "Final balance {} ({}): {} {}",
                account.id, account.name, account.balance, account.currency
            );
        }
    }

    Ok(())
}
