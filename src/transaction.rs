//! Transaction records kept in an account's log.

use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier assigned to a transaction when it is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two balance-changing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    /// Credits the account.
    Deposit,

    /// Debits the account.
    Withdrawal,
}

impl TxKind {
    /// Human-readable label used as the transaction description.
    pub fn description(&self) -> &'static str {
        match self {
            TxKind::Deposit => "Deposit",
            TxKind::Withdrawal => "Withdrawal",
        }
    }

    /// Parses an action name as written in operation files.
    ///
    /// Accepts `deposit`, `withdraw` and `withdrawal`, ignoring case and
    /// surrounding whitespace.
    pub fn parse(action: &str) -> Option<Self> {
        match action.trim().to_lowercase().as_str() {
            "deposit" => Some(TxKind::Deposit),
            "withdraw" | "withdrawal" => Some(TxKind::Withdrawal),
            _ => None,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// An immutable record of one successful deposit or withdrawal.
///
/// Only the account creates transactions, and only after the amount has
/// been validated, so `amount` is always strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    id: TransactionId,

    #[serde(rename = "type")]
    kind: TxKind,

    amount: Money,

    timestamp: DateTime<Utc>,

    description: &'static str,
}

impl Transaction {
    pub(crate) fn new(kind: TxKind, amount: Money, timestamp: DateTime<Utc>) -> Self {
        Transaction {
            id: TransactionId::new(),
            kind,
            amount,
            timestamp,
            description: kind.description(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn kind(&self) -> TxKind {
        self.kind
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Signed effect of this transaction on the balance.
    pub fn balance_effect(&self) -> Money {
        match self.kind {
            TxKind::Deposit => self.amount,
            TxKind::Withdrawal => Money::ZERO - self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_new_transaction_derives_description() {
        let now = Utc::now();
        let tx = Transaction::new(TxKind::Deposit, dec("500"), now);

        assert_eq!(tx.kind(), TxKind::Deposit);
        assert_eq!(tx.amount(), dec("500"));
        assert_eq!(tx.timestamp(), now);
        assert_eq!(tx.description(), "Deposit");

        let tx = Transaction::new(TxKind::Withdrawal, dec("20"), now);
        assert_eq!(tx.description(), "Withdrawal");
    }

    #[test]
    fn test_ids_are_unique() {
        let now = Utc::now();
        let a = Transaction::new(TxKind::Deposit, dec("1"), now);
        let b = Transaction::new(TxKind::Deposit, dec("1"), now);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_balance_effect() {
        let now = Utc::now();
        assert_eq!(
            Transaction::new(TxKind::Deposit, dec("10"), now).balance_effect(),
            dec("10")
        );
        assert_eq!(
            Transaction::new(TxKind::Withdrawal, dec("10"), now).balance_effect(),
            dec("-10")
        );
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(TxKind::parse("deposit"), Some(TxKind::Deposit));
        assert_eq!(TxKind::parse("  Withdraw "), Some(TxKind::Withdrawal));
        assert_eq!(TxKind::parse("WITHDRAWAL"), Some(TxKind::Withdrawal));
        assert_eq!(TxKind::parse("transfer"), None);
    }
}
