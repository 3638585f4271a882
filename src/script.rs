//! Batch processing of operation files and statement output.
//!
//! An operation file is a CSV with the header `action,amount`. Each row is
//! fed through an [`AtmSession`] exactly as if a user had typed the amount
//! and pressed the matching button.

use crate::account::Account;
use crate::error::Result;
use crate::session::AtmSession;
use crate::transaction::TxKind;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{info, warn};
use serde::Deserialize;
use std::io::{Read, Write};

/// Raw operation row as read from CSV.
#[derive(Debug, Deserialize)]
pub struct OperationRecord {
    /// `deposit`, `withdraw` or `withdrawal`
    pub action: String,

    /// Amount exactly as entered; validated by the engine
    pub amount: Option<String>,
}

impl OperationRecord {
    /// Returns the requested kind, or `None` for an unknown action.
    pub fn kind(&self) -> Option<TxKind> {
        TxKind::parse(&self.action)
    }
}

/// Counts of what happened to each row of an operation file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    pub rejected: usize,
    pub skipped: usize,
}

/// Runs every operation in `reader` against `session`.
///
/// Rejected operations are logged at warn level and processing continues.
/// Rows that cannot be read or name an unknown action are skipped.
pub fn run_operations<R: Read>(session: &mut AtmSession, reader: R) -> Result<RunSummary> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut summary = RunSummary::default();

    for (row_idx, result) in csv_reader.deserialize::<OperationRecord>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Row {}: CSV parse error: {}", row_num, e);
                summary.skipped += 1;
                continue;
            }
        };

        let Some(kind) = record.kind() else {
            warn!("Row {}: Unknown action {:?}, skipping", row_num, record.action);
            summary.skipped += 1;
            continue;
        };

        session.set_input(record.amount.unwrap_or_default());
        let outcome = match kind {
            TxKind::Deposit => session.deposit(),
            TxKind::Withdrawal => session.withdraw(),
        };

        match outcome {
            Ok(receipt) => {
                info!("Row {}: {}", row_num, receipt.message(session.currency_code()));
                summary.applied += 1;
            }
            Err(e) => {
                warn!("Row {}: {} rejected: {}", row_num, kind, e);
                summary.rejected += 1;
            }
        }
        session.dismiss_alert();
    }

    Ok(summary)
}

/// Writes the account's transaction log as CSV.
///
/// The header is always written, even for an empty log.
pub fn write_statement<W: Write>(account: &Account, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(["id", "type", "amount", "timestamp", "description"])?;
    for tx in account.transactions() {
        csv_writer.serialize(tx)?;
    }

    csv_writer.flush()?;
    Ok(())
}
