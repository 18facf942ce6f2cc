//! Fee/Fine Bulk Action CLI
//!
//! Command-line interface for applying bulk monetary actions to fee/fine
//! accounts loaded from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --action pay --amount 4.00 --accounts acc-1,acc-2 accounts.csv
//! cargo run -- --action refund --amount 1.50 --accounts acc-1 --ledger ledger.csv accounts.csv
//! cargo run -- --action waive --amount 2.00 --accounts acc-1 --check accounts.csv
//! ```
//!
//! The program loads the account states (and, when given, an existing
//! ledger providing refund history), runs the requested bulk action through
//! the pipeline, writes the updated account states to stdout, and appends
//! the created ledger entries to `--ledger-out` when requested. With
//! `--check`, nothing is mutated and the allowed/remaining outcome is
//! printed instead.
//!
//! # Exit Codes
//!
//! - 0: Success (including a `--check` that reports not-allowed)
//! - 1: Error (file not found, validation failure, persistence failure)

use std::fs::File;
use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use feefine_engine::cli::{self, CliArgs};
use feefine_engine::core::{BulkActionOrchestrator, LedgerStore};
use feefine_engine::io::{
    read_accounts_csv, read_ledger_csv, write_accounts_csv, write_ledger_csv,
};
use feefine_engine::store::{LoggingNoticeDispatcher, MemoryAccountStore, MemoryLedgerStore};
use feefine_engine::types::FeeFineError;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<(), FeeFineError> {
    let account_store = Arc::new(MemoryAccountStore::new());
    for account in read_accounts_csv(File::open(&args.accounts_file)?)? {
        account_store.insert(account);
    }

    let ledger_store = Arc::new(MemoryLedgerStore::new());
    if let Some(path) = &args.ledger_file {
        for entry in read_ledger_csv(File::open(path)?)? {
            ledger_store.append(&entry).await?;
        }
    }

    let orchestrator = BulkActionOrchestrator::new(
        args.action.into(),
        account_store.clone(),
        ledger_store.clone(),
        Arc::new(LoggingNoticeDispatcher),
    );

    if args.check {
        match orchestrator.check(&args.account_ids, &args.amount).await {
            Ok(outcome) => {
                println!("allowed: true");
                println!("amount: {}", outcome.amount);
                println!("remaining: {}", outcome.remaining);
            }
            Err(error) => {
                println!("allowed: false");
                println!(
                    "amount: {}",
                    error.requested_amount().unwrap_or(args.amount.as_str())
                );
                println!("error: {}", error);
            }
        }
        return Ok(());
    }

    orchestrator.perform(args.to_request()).await?;

    let mut stdout = std::io::stdout();
    write_accounts_csv(&account_store.all_sorted(), &mut stdout)?;

    if let Some(path) = &args.ledger_out {
        let mut file = File::create(path)?;
        write_ledger_csv(&ledger_store.all_sorted(), &mut file)?;
    }

    Ok(())
}
