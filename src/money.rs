//! Exact decimal money type and currency formatting.
//!
//! Amounts are kept at full precision via `rust_decimal`; rounding to cents
//! only happens when a value is rendered for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A monetary amount backed by `rust_decimal::Decimal`.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use atm_engine::Money;
///
/// let amount = Money::from_str(" 10.5 ").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Number of fractional digits used when rendering.
    pub const DISPLAY_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Creates an amount from whole currency units.
    pub fn from_units(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns `true` if the amount is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Adds `rhs`, returning `None` if the sum overflows or cannot be
    /// represented without losing part of `rhs`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let sum = self.0.checked_add(rhs.0)?;
        (sum.checked_sub(self.0)? == rhs.0).then_some(Money(sum))
    }

    /// Subtracts `rhs`, returning `None` if the difference overflows or
    /// cannot be represented without losing part of `rhs`.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let diff = self.0.checked_sub(rhs.0)?;
        (self.0.checked_sub(diff)? == rhs.0).then_some(Money(diff))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    /// Accepts plain or scientific decimal notation only. Digit separators
    /// such as `_` are rejected even though `Decimal` would skip them.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(ch) = trimmed
            .chars()
            .find(|c| !matches!(c, '0'..='9' | '.' | '+' | '-' | 'e' | 'E'))
        {
            return Err(rust_decimal::Error::ErrorString(format!(
                "invalid character {:?} in amount",
                ch
            )));
        }
        Decimal::from_str(trimmed).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(Self::DISPLAY_SCALE))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Formats an amount for display in the given ISO currency.
///
/// Known codes get their symbol (`USD` → `$1,500.00`, `JPY` → `¥1,500`);
/// anything else is rendered as `CODE 1,500.00`.
pub fn format_currency(amount: Money, currency_code: &str) -> String {
    let code = currency_code.trim().to_ascii_uppercase();
    let (symbol, decimals) = match code.as_str() {
        "USD" => (Some("$"), 2),
        "EUR" => (Some("€"), 2),
        "GBP" => (Some("£"), 2),
        "JPY" => (Some("¥"), 0),
        _ => (None, 2),
    };

    let rounded = amount.value().round_dp(decimals);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let number = match text.split_once('.') {
        Some((whole, frac)) => format!("{}.{}", group_thousands(whole), frac),
        None => group_thousands(&text),
    };
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };

    match symbol {
        Some(symbol) => format!("{}{}{}", sign, symbol, number),
        None => format!("{}{} {}", sign, code, number),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_from_str_trims_and_keeps_precision() {
        assert_eq!(money("  2.5  ").value(), Decimal::new(25, 1));
        assert_eq!(money("0.001").value(), Decimal::new(1, 3));
        assert!(Money::from_str("abc").is_err());
        assert!(Money::from_str("").is_err());
    }

    #[test]
    fn test_from_str_rejects_digit_separators() {
        assert!(Money::from_str("1_000").is_err());
        assert!(Money::from_str("1__0").is_err());
        assert!(Money::from_str("1,000").is_err());
        assert!(Money::from_str("1 000").is_err());
    }

    #[test]
    fn test_from_str_accepts_scientific_notation() {
        assert_eq!(money("1e3"), Money::from_units(1000));
        assert_eq!(money("5E2"), Money::from_units(500));
    }

    #[test]
    fn test_checked_add_and_sub() {
        assert_eq!(money("1.5").checked_add(money("2")), Some(money("3.5")));
        assert_eq!(money("3.5").checked_sub(money("2")), Some(money("1.5")));

        let max = Money::from_str("79228162514264337593543950335").unwrap();
        assert_eq!(max.checked_add(money("10000")), None);
        assert_eq!(
            money("1000").checked_add(money("0.0000000000000000000000000001")),
            None
        );
        assert_eq!(
            money("1000").checked_sub(money("0.0000000000000000000000000001")),
            None
        );
    }

    #[test]
    fn test_display_renders_two_places() {
        assert_eq!(money("1500").to_string(), "1500.00");
        assert_eq!(money("0.5").to_string(), "0.50");
        assert_eq!(money("12.344").to_string(), "12.34");
    }

    #[test]
    fn test_sign_checks() {
        assert!(money("0.01").is_positive());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
        assert!(money("-1").is_negative());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = money("1.5");
        let b = money("2.25");
        assert_eq!(a + b, money("3.75"));
        assert_eq!(b - a, money("0.75"));

        let total: Money = vec![a, b, money("1")].into_iter().sum();
        assert_eq!(total, money("4.75"));
    }

    #[test]
    fn test_format_currency_usd() {
        assert_eq!(format_currency(money("1500"), "USD"), "$1,500.00");
        assert_eq!(format_currency(money("0.5"), "usd"), "$0.50");
        assert_eq!(format_currency(money("1234567.891"), "USD"), "$1,234,567.89");
        assert_eq!(format_currency(money("-20"), "USD"), "-$20.00");
    }

    #[test]
    fn test_format_currency_other_codes() {
        assert_eq!(format_currency(money("1000"), "EUR"), "€1,000.00");
        assert_eq!(format_currency(money("999.99"), "GBP"), "£999.99");
        assert_eq!(format_currency(money("1500"), "JPY"), "¥1,500");
        assert_eq!(format_currency(money("42"), "CHF"), "CHF 42.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
    }
}
