//! Engine configuration: account defaults, display currency and limits.

use crate::account::Account;
use crate::error::{CliError, Result};
use crate::money::Money;
use std::str::FromStr;

/// Environment variable overriding the opening balance.
pub const ENV_OPENING_BALANCE: &str = "ATM_OPENING_BALANCE";

/// Environment variable overriding the account number.
pub const ENV_ACCOUNT_NUMBER: &str = "ATM_ACCOUNT_NUMBER";

/// Environment variable overriding the display currency.
pub const ENV_CURRENCY: &str = "ATM_CURRENCY";

/// Largest opening balance accepted from the environment, in whole units.
pub const MAX_OPENING_BALANCE_UNITS: i64 = 1_000_000_000_000_000;

/// Per-operation upper bounds. Both are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_deposit: Money,
    pub max_withdrawal: Money,
}

impl Limits {
    pub fn new(max_deposit: Money, max_withdrawal: Money) -> Self {
        Limits {
            max_deposit,
            max_withdrawal,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits::new(Money::from_units(10_000), Money::from_units(5_000))
    }
}

/// Settings used to build an engine and its session.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub opening_balance: Money,
    pub account_number: String,
    pub currency_code: String,
    pub limits: Limits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            opening_balance: Money::from_units(Account::DEFAULT_BALANCE_UNITS),
            account_number: Account::DEFAULT_ACCOUNT_NUMBER.to_string(),
            currency_code: "USD".to_string(),
            limits: Limits::default(),
        }
    }
}

impl EngineConfig {
    /// Builds a config from defaults overridden by `ATM_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults overridden by values from `lookup`.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EngineConfig::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(raw) = get(ENV_OPENING_BALANCE) {
            let balance = Money::from_str(&raw).map_err(|e| CliError::Config {
                key: ENV_OPENING_BALANCE,
                message: e.to_string(),
            })?;
            if balance.is_negative() {
                return Err(CliError::Config {
                    key: ENV_OPENING_BALANCE,
                    message: format!("opening balance must not be negative, got {}", raw),
                });
            }
            if balance > Money::from_units(MAX_OPENING_BALANCE_UNITS) {
                return Err(CliError::Config {
                    key: ENV_OPENING_BALANCE,
                    message: format!(
                        "opening balance must not exceed {}, got {}",
                        MAX_OPENING_BALANCE_UNITS, raw
                    ),
                });
            }
            config.opening_balance = balance;
        }

        if let Some(number) = get(ENV_ACCOUNT_NUMBER) {
            config.account_number = number;
        }

        if let Some(code) = get(ENV_CURRENCY) {
            config.currency_code = code.to_ascii_uppercase();
        }

        Ok(config)
    }
}
