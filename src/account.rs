//! Bank account model and its append-only transaction log.
//!
//! Maintains the invariant:
//! `balance == opening_balance + deposits - withdrawals` at all times.

use crate::error::AtmError;
use crate::money::Money;
use crate::transaction::{Transaction, TxKind};
use chrono::{DateTime, Utc};

/// A single bank account.
///
/// # Invariants
///
/// - `transactions` only ever grows; entries are never removed or changed
/// - every recorded amount is strictly positive
/// - timestamps in `transactions` are non-decreasing
/// - `balance` equals the opening balance plus the signed sum of the log
#[derive(Debug, Clone)]
pub struct Account {
    account_number: String,
    opening_balance: Money,
    balance: Money,
    transactions: Vec<Transaction>,
}

impl Account {
    /// Identifier used when none is supplied.
    pub const DEFAULT_ACCOUNT_NUMBER: &'static str = "ACC001";

    /// Opening balance used when none is supplied, in whole units.
    pub const DEFAULT_BALANCE_UNITS: i64 = 1_000;

    /// Creates an account with an empty log.
    pub fn new(account_number: impl Into<String>, opening_balance: Money) -> Self {
        Account {
            account_number: account_number.into(),
            opening_balance,
            balance: opening_balance,
            transactions: Vec::new(),
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn opening_balance(&self) -> Money {
        self.opening_balance
    }

    /// All recorded transactions, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The most recently recorded transaction, if any.
    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    /// Credits the account and records a deposit.
    ///
    /// Fails with `DepositLimitExceeded` if the new balance cannot be
    /// represented exactly.
    pub(crate) fn credit(
        &mut self,
        amount: Money,
        now: DateTime<Utc>,
    ) -> Result<&Transaction, AtmError> {
        if !amount.is_positive() {
            return Err(AtmError::InvalidAmount);
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AtmError::DepositLimitExceeded)?;
        Ok(self.append(TxKind::Deposit, amount, now))
    }

    /// Debits the account and records a withdrawal.
    ///
    /// Fails with `InsufficientFunds` if `amount` exceeds the balance, and
    /// with `WithdrawalLimitExceeded` if the new balance cannot be
    /// represented exactly.
    pub(crate) fn debit(
        &mut self,
        amount: Money,
        now: DateTime<Utc>,
    ) -> Result<&Transaction, AtmError> {
        if !amount.is_positive() {
            return Err(AtmError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(AtmError::InsufficientFunds);
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(AtmError::WithdrawalLimitExceeded)?;
        Ok(self.append(TxKind::Withdrawal, amount, now))
    }

    fn append(&mut self, kind: TxKind, amount: Money, now: DateTime<Utc>) -> &Transaction {
        // Clock may step backwards; keep the log ordered.
        let timestamp = match self.transactions.last() {
            Some(last) if last.timestamp() > now => last.timestamp(),
            _ => now,
        };

        self.transactions.push(Transaction::new(kind, amount, timestamp));
        &self.transactions[self.transactions.len() - 1]
    }

    /// Recomputes the balance from the opening balance and the log.
    pub fn recomputed_balance(&self) -> Money {
        self.opening_balance
            + self
                .transactions
                .iter()
                .map(Transaction::balance_effect)
                .sum::<Money>()
    }

    /// Verifies that the stored balance matches the log.
    pub fn audit(&self) -> bool {
        self.balance == self.recomputed_balance()
    }
}

impl Default for Account {
    fn default() -> Self {
        Account::new(
            Self::DEFAULT_ACCOUNT_NUMBER,
            Money::from_units(Self::DEFAULT_BALANCE_UNITS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::str::FromStr;

    fn dec(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_default_account() {
        let account = Account::default();
        assert_eq!(account.account_number(), "ACC001");
        assert_eq!(account.balance().to_string(), "1000.00");
        assert_eq!(account.opening_balance(), account.balance());
        assert!(account.transactions().is_empty());
        assert!(account.last_transaction().is_none());
    }

    #[test]
    fn test_credit_increases_balance_and_logs() {
        let mut account = Account::default();
        let tx = account.credit(dec("500"), Utc::now()).unwrap();
        assert_eq!(tx.kind(), TxKind::Deposit);
        assert_eq!(tx.amount(), dec("500"));

        assert_eq!(account.balance().to_string(), "1500.00");
        assert_eq!(account.transactions().len(), 1);
        assert!(account.audit());
    }

    #[test]
    fn test_debit_decreases_balance_and_logs() {
        let mut account = Account::default();
        account.debit(dec("200"), Utc::now()).unwrap();

        assert_eq!(account.balance().to_string(), "800.00");
        assert_eq!(
            account.last_transaction().map(|t| t.kind()),
            Some(TxKind::Withdrawal)
        );
        assert!(account.audit());
    }

    #[test]
    fn test_debit_entire_balance_is_allowed() {
        let mut account = Account::default();
        account.debit(dec("1000"), Utc::now()).unwrap();
        assert_eq!(account.balance(), Money::ZERO);
    }

    #[test]
    fn test_debit_fails_with_insufficient_funds() {
        let mut account = Account::default();
        let result = account.debit(dec("1000.01"), Utc::now());

        assert_eq!(result.unwrap_err(), AtmError::InsufficientFunds);
        assert_eq!(account.balance().to_string(), "1000.00");
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_non_positive_amounts_are_never_recorded() {
        let mut account = Account::default();
        assert_eq!(
            account.credit(Money::ZERO, Utc::now()).unwrap_err(),
            AtmError::InvalidAmount
        );
        assert_eq!(
            account.debit(dec("-5"), Utc::now()).unwrap_err(),
            AtmError::InvalidAmount
        );
        assert!(account.transactions().is_empty());
        assert!(account.audit());
    }

    #[test]
    fn test_credit_that_would_overflow_is_rejected() {
        let max = dec("79228162514264337593543950335");
        let mut account = Account::new("ACC001", max);

        assert_eq!(
            account.credit(dec("10000"), Utc::now()).unwrap_err(),
            AtmError::DepositLimitExceeded
        );
        assert_eq!(account.balance(), max);
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_unrepresentable_precision_is_never_recorded() {
        let tiny = dec("0.0000000000000000000000000001");
        let mut account = Account::default();

        assert_eq!(
            account.credit(tiny, Utc::now()).unwrap_err(),
            AtmError::DepositLimitExceeded
        );
        assert_eq!(
            account.debit(tiny, Utc::now()).unwrap_err(),
            AtmError::WithdrawalLimitExceeded
        );
        assert_eq!(account.balance().to_string(), "1000.00");
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let mut account = Account::default();
        let now = Utc::now();
        account.credit(dec("1"), now).unwrap();
        account.credit(dec("1"), now - Duration::seconds(30)).unwrap();

        let log = account.transactions();
        assert_eq!(log[1].timestamp(), now);
        assert!(log[0].timestamp() <= log[1].timestamp());
    }

    #[test]
    fn test_audit_recomputes_from_log() {
        let mut account = Account::new("ACC042", dec("50"));
        account.credit(dec("25.25"), Utc::now()).unwrap();
        account.debit(dec("70"), Utc::now()).unwrap();
        account.credit(dec("0.01"), Utc::now()).unwrap();

        assert_eq!(account.recomputed_balance(), dec("5.26"));
        assert_eq!(account.balance(), dec("5.26"));
        assert!(account.audit());
    }
}
