//! Type-safe price representation using decimal arithmetic.
//!
//! All money in the storefront is a [`Price`]. Arithmetic keeps full decimal
//! precision; rounding to cents happens only in [`Price::display`].
//! Arithmetic saturates at [`Price::MAX`] instead of overflowing.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`] from display text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is empty once the currency symbol is removed.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(String),
}

/// A USD amount.
///
/// Serialized as a plain JSON number (`59.99`) so stored carts stay readable
/// by anything that wrote them as floating-point values.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable amount.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse display text such as `"$59.99"` or `"59.99"`.
    ///
    /// Surrounding whitespace and a single leading `$` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the remaining text is empty, is not a decimal
    /// number, or is negative.
    pub fn parse(text: &str) -> Result<Self, PriceError> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();

        if digits.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = Decimal::from_str(digits)
            .or_else(|_| Decimal::from_scientific(digits))
            .map_err(|_| PriceError::Invalid(text.to_owned()))?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(text.to_owned()));
        }

        Ok(Self(amount))
    }

    /// The unrounded decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true for a zero amount.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// This price multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map_or(Self::MAX, Self)
    }

    /// This price multiplied by a decimal factor (e.g. a tax rate).
    #[must_use]
    pub fn scaled(self, factor: Decimal) -> Self {
        self.0.checked_mul(factor).map_or(Self::MAX, Self)
    }

    /// The amount rounded to cents, half away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.rounded())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.0.checked_add(rhs.0).map_or(Self::MAX, Self)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_text() {
        assert_eq!(Price::parse("$59.99").unwrap(), Price::from_cents(5999));
        assert_eq!(Price::parse(" 49.5 ").unwrap(), Price::from_cents(4950));
        assert_eq!(Price::parse("$ 100").unwrap(), Price::from_cents(10000));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Price::parse(""), Err(PriceError::Empty)));
        assert!(matches!(Price::parse("$"), Err(PriceError::Empty)));
        assert!(matches!(Price::parse("free"), Err(PriceError::Invalid(_))));
        assert!(matches!(
            Price::parse("-5.00"),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Price::from_cents(4000).display(), "$40.00");
        assert_eq!(Price::new(Decimal::new(3605, 3)).display(), "$3.61");
        assert_eq!(Price::new(Decimal::new(3604, 3)).display(), "$3.60");
        assert_eq!(Price::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_arithmetic_keeps_precision() {
        let tax = Price::from_cents(1999).scaled(Decimal::new(9, 2));
        assert_eq!(tax.amount(), Decimal::new(179_910, 5));
        assert_eq!(tax.display(), "$1.80");

        let total: Price = [Price::from_cents(1000), Price::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(1250));
        assert_eq!(Price::from_cents(2000).times(3), Price::from_cents(6000));
    }

    #[test]
    fn test_arithmetic_saturates_at_max() {
        let whale = Price::parse("79228162514264337593543950335").unwrap();
        assert_eq!(whale, Price::MAX);

        assert_eq!(whale.times(2), Price::MAX);
        assert_eq!(whale + Price::from_cents(1), Price::MAX);
        assert_eq!(whale.scaled(Decimal::from(3)), Price::MAX);

        let total: Price = [whale, whale, Price::from_cents(499)].into_iter().sum();
        assert_eq!(total, Price::MAX);
        assert!(total.display().starts_with('$'));
    }

    #[test]
    fn test_serde_uses_json_numbers() {
        let json = serde_json::to_string(&Price::from_cents(5999)).unwrap();
        assert_eq!(json, "59.99");

        let price: Price = serde_json::from_str("59.99").unwrap();
        assert_eq!(price, Price::from_cents(5999));

        let whole: Price = serde_json::from_str("20").unwrap();
        assert_eq!(whole, Price::from_cents(2000));
    }
}
