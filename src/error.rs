//! Error types for the ATM engine and its command-line front-end.

use thiserror::Error;

/// Result type alias for CLI-level operations.
pub type Result<T> = std::result::Result<T, CliError>;

const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid amount.";
const DEPOSIT_LIMIT_MESSAGE: &str = "Deposit must be between $0.01 and $10,000.";
const WITHDRAWAL_LIMIT_MESSAGE: &str = "Withdrawal must be between $0.01 and $5,000.";
const INSUFFICIENT_FUNDS_MESSAGE: &str = "Insufficient funds for this withdrawal.";

/// Reasons a deposit or withdrawal request is rejected.
///
/// Exactly one kind is reported per call. A rejected call never changes the
/// account.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtmError {
    /// Input is not a decimal number greater than zero.
    #[error("{}", INVALID_AMOUNT_MESSAGE)]
    InvalidAmount,

    /// Deposit exceeds the per-operation deposit limit.
    #[error("{}", DEPOSIT_LIMIT_MESSAGE)]
    DepositLimitExceeded,

    /// Withdrawal exceeds the per-operation withdrawal limit.
    #[error("{}", WITHDRAWAL_LIMIT_MESSAGE)]
    WithdrawalLimitExceeded,

    /// Withdrawal exceeds the current balance.
    #[error("{}", INSUFFICIENT_FUNDS_MESSAGE)]
    InsufficientFunds,
}

impl AtmError {
    /// User-facing message for this kind.
    pub fn message(&self) -> &'static str {
        match self {
            AtmError::InvalidAmount => INVALID_AMOUNT_MESSAGE,
            AtmError::DepositLimitExceeded => DEPOSIT_LIMIT_MESSAGE,
            AtmError::WithdrawalLimitExceeded => WITHDRAWAL_LIMIT_MESSAGE,
            AtmError::InsufficientFunds => INSUFFICIENT_FUNDS_MESSAGE,
        }
    }
}

/// Errors that can occur while running the `atm` binary.
#[derive(Error, Debug)]
pub enum CliError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid value in an environment variable
    #[error("Invalid configuration for {key}: {message}")]
    Config { key: &'static str, message: String },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: atm <operations.csv>")]
    MissingArgument,
}
