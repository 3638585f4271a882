//! # ATM Engine
//!
//! A single-account ATM: validated deposits and withdrawals, per-operation
//! limits, and an append-only transaction log.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: Amounts are `rust_decimal` values, never floats
//! - **All-or-nothing operations**: A rejected request leaves the account untouched
//! - **Ordered validation**: Format, then limit, then available funds
//! - **UI-free core**: Alerts and input buffers live in [`AtmSession`]
//!
//! ## Example
//!
//! ```
//! use atm_engine::{AtmError, TransactionEngine};
//!
//! let mut engine = TransactionEngine::new();
//! let receipt = engine.deposit("500").unwrap();
//! assert_eq!(receipt.message("USD"), "Deposit of $500.00 successful!");
//! assert_eq!(engine.withdraw("6000"), Err(AtmError::WithdrawalLimitExceeded));
//! ```

pub mod account;
pub mod config;
pub mod engine;
pub mod error;
pub mod money;
pub mod script;
pub mod session;
pub mod transaction;

pub use account::Account;
pub use config::{EngineConfig, Limits};
pub use engine::{parse_amount, Receipt, TransactionEngine};
pub use error::{AtmError, CliError, Result};
pub use money::{format_currency, Money};
pub use script::{run_operations, write_statement, OperationRecord, RunSummary};
pub use session::{Alert, AlertKind, AtmSession};
pub use transaction::{Transaction, TransactionId, TxKind};
