//! Presentation adapter between a user interface and the engine.
//!
//! Holds the UI-side state the engine deliberately knows nothing about: the
//! pending input text, the alert to show after an operation, and the display
//! currency.

use crate::config::EngineConfig;
use crate::engine::{parse_amount, Receipt, TransactionEngine};
use crate::error::AtmError;
use crate::money::format_currency;
use crate::transaction::{Transaction, TxKind};

/// Whether an alert reports a success or a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// A message waiting to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// One interactive ATM session over a single engine.
#[derive(Debug, Clone)]
pub struct AtmSession {
    engine: TransactionEngine,
    currency_code: String,
    input: String,
    alert: Option<Alert>,
}

impl AtmSession {
    pub fn new(engine: TransactionEngine, currency_code: impl Into<String>) -> Self {
        AtmSession {
            engine,
            currency_code: currency_code.into(),
            input: String::new(),
            alert: None,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            TransactionEngine::from_config(config),
            config.currency_code.clone(),
        )
    }

    pub fn engine(&self) -> &TransactionEngine {
        &self.engine
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// `true` if the pending input is a number greater than zero.
    pub fn is_valid_input(&self) -> bool {
        parse_amount(&self.input).is_ok()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn account_number(&self) -> &str {
        self.engine.account().account_number()
    }

    /// Current balance rendered in the session currency.
    pub fn formatted_balance(&self) -> String {
        format_currency(self.engine.balance(), &self.currency_code)
    }

    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.engine.last_transaction()
    }

    /// Deposits the pending input.
    pub fn deposit(&mut self) -> Result<Receipt, AtmError> {
        self.perform(TxKind::Deposit)
    }

    /// Withdraws the pending input.
    pub fn withdraw(&mut self) -> Result<Receipt, AtmError> {
        self.perform(TxKind::Withdrawal)
    }

    fn perform(&mut self, kind: TxKind) -> Result<Receipt, AtmError> {
        let result = match kind {
            TxKind::Deposit => self.engine.deposit(&self.input),
            TxKind::Withdrawal => self.engine.withdraw(&self.input),
        };

        self.alert = Some(match &result {
            Ok(receipt) => {
                self.input.clear();
                Alert {
                    kind: AlertKind::Success,
                    message: receipt.message(&self.currency_code),
                }
            }
            Err(e) => Alert {
                kind: AlertKind::Error,
                message: e.message().to_string(),
            },
        });

        result
    }
}

impl Default for AtmSession {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
