//! ATM CLI
//!
//! Replays a CSV of deposit/withdrawal operations against a single account
//! and writes the resulting transaction statement to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > statement.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info` or `warn` to control logging verbosity
//! - `ATM_OPENING_BALANCE`: Starting balance (default `1000`)
//! - `ATM_ACCOUNT_NUMBER`: Account identifier (default `ACC001`)
//! - `ATM_CURRENCY`: Display currency code (default `USD`)

use atm_engine::{run_operations, write_statement, AtmSession, CliError, EngineConfig, Result};
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(CliError::MissingArgument);
    }

    let config = EngineConfig::from_env()?;
    let mut session = AtmSession::from_config(&config);

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let summary = run_operations(&mut session, BufReader::new(file))?;

    info!(
        "Processed {} applied, {} rejected, {} skipped; account {} balance {}",
        summary.applied,
        summary.rejected,
        summary.skipped,
        session.account_number(),
        session.formatted_balance()
    );

    let stdout = io::stdout();
    let handle = stdout.lock();
    write_statement(session.engine().account(), handle)?;

    Ok(())
}
