//! Core transaction engine.
//!
//! Validates raw deposit and withdrawal requests against the configured
//! limits and the current balance, then applies them to the account. Every
//! call either fully succeeds or leaves the account untouched.

use crate::account::Account;
use crate::config::{EngineConfig, Limits};
use crate::error::AtmError;
use crate::money::{format_currency, Money};
use crate::transaction::{Transaction, TransactionId, TxKind};
use chrono::Utc;
use log::debug;
use std::str::FromStr;

/// Outcome of a successful deposit or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub kind: TxKind,
    pub amount: Money,
    pub balance_after: Money,
    pub transaction_id: TransactionId,
}

impl Receipt {
    /// Confirmation text, e.g. `Deposit of $500.00 successful!`.
    pub fn message(&self, currency_code: &str) -> String {
        format!(
            "{} of {} successful!",
            self.kind.description(),
            format_currency(self.amount, currency_code)
        )
    }
}

/// The ATM transaction engine.
///
/// Owns a single account exclusively. Validation runs in a fixed order:
/// amount format and positivity, then the per-kind limit, then (for
/// withdrawals) available funds. The first failing check decides the error.
#[derive(Debug, Clone)]
pub struct TransactionEngine {
    account: Account,
    limits: Limits,
}

impl TransactionEngine {
    /// Creates an engine over the default account with default limits.
    pub fn new() -> Self {
        Self::with_account(Account::default(), Limits::default())
    }

    pub fn with_account(account: Account, limits: Limits) -> Self {
        TransactionEngine { account, limits }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_account(
            Account::new(config.account_number.clone(), config.opening_balance),
            config.limits,
        )
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn balance(&self) -> Money {
        self.account.balance()
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Returns the most recently recorded transaction, if any.
    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.account.last_transaction()
    }

    /// Deposits the amount given as raw text.
    pub fn deposit(&mut self, raw_input: &str) -> Result<Receipt, AtmError> {
        self.execute(TxKind::Deposit, raw_input)
    }

    /// Withdraws the amount given as raw text.
    pub fn withdraw(&mut self, raw_input: &str) -> Result<Receipt, AtmError> {
        self.execute(TxKind::Withdrawal, raw_input)
    }

    /// Runs every check for `kind` without touching the account.
    ///
    /// Returns the parsed amount if the operation would succeed. An amount
    /// that passes every ordered check but cannot be applied to the balance
    /// exactly is reported as exceeding the per-kind limit, whose message
    /// names the accepted range.
    pub fn validate(&self, kind: TxKind, raw_input: &str) -> Result<Money, AtmError> {
        let amount = parse_amount(raw_input)?;

        match kind {
            TxKind::Deposit if amount > self.limits.max_deposit => {
                Err(AtmError::DepositLimitExceeded)
            }
            TxKind::Withdrawal if amount > self.limits.max_withdrawal => {
                Err(AtmError::WithdrawalLimitExceeded)
            }
            TxKind::Withdrawal if amount > self.account.balance() => {
                Err(AtmError::InsufficientFunds)
            }
            // Balance must absorb the amount exactly: no overflow, no rounding.
            TxKind::Deposit if self.account.balance().checked_add(amount).is_none() => {
                Err(AtmError::DepositLimitExceeded)
            }
            TxKind::Withdrawal if self.account.balance().checked_sub(amount).is_none() => {
                Err(AtmError::WithdrawalLimitExceeded)
            }
            _ => Ok(amount),
        }
    }

    fn execute(&mut self, kind: TxKind, raw_input: &str) -> Result<Receipt, AtmError> {
        let amount = match self.validate(kind, raw_input) {
            Ok(amount) => amount,
            Err(e) => {
                debug!("{} of {:?} rejected: {:?}", kind, raw_input, e);
                return Err(e);
            }
        };

        let now = Utc::now();
        let tx = match kind {
            TxKind::Deposit => self.account.credit(amount, now)?,
            TxKind::Withdrawal => self.account.debit(amount, now)?,
        };
        let transaction_id = tx.id();

        let balance_after = self.account.balance();
        debug!(
            "{} {} applied to {}, balance now {}",
            kind,
            amount,
            self.account.account_number(),
            balance_after
        );

        Ok(Receipt {
            kind,
            amount,
            balance_after,
            transaction_id,
        })
    }
}

impl Default for TransactionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses user input as a strictly positive amount.
pub fn parse_amount(raw_input: &str) -> Result<Money, AtmError> {
    match Money::from_str(raw_input) {
        Ok(amount) if amount.is_positive() => Ok(amount),
        _ => Err(AtmError::InvalidAmount),
    }
}
