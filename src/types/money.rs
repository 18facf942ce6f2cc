//! Monetary value type for fee/fine amounts
//!
//! This module defines the `MonetaryValue` type used for every amount in the
//! system: account balances, requested action amounts, per-account
//! allocations, and ledger entry fields.
//!
//! # Precision
//!
//! All values are fixed-point decimals with a scale of exactly two digits
//! (currency minor units). Any input with more precision is normalized on
//! construction using round-half-up, so `1.235987654321` and `1.24` compare
//! equal. Values are never represented as binary floating point.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A monetary amount with a fixed two-decimal scale
///
/// `MonetaryValue` wraps a `rust_decimal::Decimal` that is always normalized
/// to scale 2 with round-half-up. Equality and ordering are defined on the
/// normalized decimal value.
///
/// Subtraction is not clamped: a result below zero is representable and must
/// be validated by the caller where the domain requires non-negativity
/// (validation happens before any account mutation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonetaryValue(Decimal);

impl MonetaryValue {
    /// Number of decimal digits kept by every value
    pub const SCALE: u32 = 2;

    /// Create a monetary value from a raw decimal, normalizing to scale 2
    ///
    /// Rounding uses round-half-up (midpoint away from zero), matching how
    /// balances entered with excess precision are interpreted everywhere
    /// else in the system.
    pub fn new(value: Decimal) -> Self {
        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        // Scale can only grow here; the rounding above already capped it at 2
        normalized.rescale(Self::SCALE);
        MonetaryValue(normalized)
    }

    /// The zero amount (0.00)
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    /// Add another value, returning a new normalized value
    pub fn add(self, other: MonetaryValue) -> Self {
        Self::new(self.0 + other.0)
    }

    /// Subtract another value, returning a new normalized value
    ///
    /// The result may be negative; no clamping is applied.
    pub fn subtract(self, other: MonetaryValue) -> Self {
        Self::new(self.0 - other.0)
    }

    /// `true` if this value is strictly greater than `other`
    pub fn is_greater_than(self, other: MonetaryValue) -> bool {
        self.0 > other.0
    }

    /// `true` if this value is exactly zero
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// `true` if this value is strictly greater than zero
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// The smaller of two values
    pub fn min(self, other: MonetaryValue) -> Self {
        if other.0 < self.0 {
            other
        } else {
            self
        }
    }

    /// The underlying normalized decimal
    pub fn inner(self) -> Decimal {
        self.0
    }
}

impl FromStr for MonetaryValue {
    type Err = rust_decimal::Error;

    /// Parse from decimal text, normalizing to scale 2 with round-half-up
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(MonetaryValue::new)
    }
}

impl From<Decimal> for MonetaryValue {
    fn from(value: Decimal) -> Self {
        MonetaryValue::new(value)
    }
}

impl Serialize for MonetaryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for MonetaryValue {
    /// Deserializes through `Decimal`, normalizing to scale 2 on the way in
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(MonetaryValue::new)
    }
}

impl fmt::Display for MonetaryValue {
    /// Always renders with exactly two decimal places (e.g. `0.24`, `3.32`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn money(s: &str) -> MonetaryValue {
        s.parse().unwrap()
    }

    #[rstest]
    #[case::already_two_decimals("4.55", "4.55")]
    #[case::integer("5", "5.00")]
    #[case::one_decimal("4.5", "4.50")]
    #[case::rounds_up_past_midpoint("1.235987654321", "1.24")]
    #[case::rounds_down_below_midpoint("1.004987654321", "1.00")]
    #[case::midpoint_rounds_up("1.235", "1.24")]
    #[case::midpoint_rounds_up_even_digit("1.225", "1.23")]
    #[case::zero("0.0", "0.00")]
    #[case::negative_midpoint_away_from_zero("-1.235", "-1.24")]
    fn test_parse_normalizes_to_two_decimals(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(money(input).to_string(), expected);
    }

    #[rstest]
    #[case::whitespace_trimmed(" 1.23 ", "1.23")]
    fn test_parse_trims_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(money(input).to_string(), expected);
    }

    #[rstest]
    #[case::letters("abc")]
    #[case::empty("")]
    #[case::double_dot("1.2.3")]
    fn test_parse_rejects_invalid_input(#[case] input: &str) {
        assert!(input.parse::<MonetaryValue>().is_err());
    }

    #[test]
    fn test_equality_is_on_normalized_value() {
        assert_eq!(money("1.235987654321"), money("1.24"));
        assert_eq!(money("1.0"), money("1.00"));
        assert_ne!(money("1.00"), money("1.01"));
    }

    #[rstest]
    #[case::simple("4.55", "1.23", "5.78")]
    #[case::carries("0.99", "0.01", "1.00")]
    fn test_add(#[case] a: &str, #[case] b: &str, #[case] expected: &str) {
        assert_eq!(money(a).add(money(b)), money(expected));
    }

    #[rstest]
    #[case::partial("4.55", "1.23", "3.32")]
    #[case::to_zero("2.00", "2.00", "0.00")]
    #[case::negative_result_not_clamped("1.00", "2.50", "-1.50")]
    fn test_subtract(#[case] a: &str, #[case] b: &str, #[case] expected: &str) {
        assert_eq!(money(a).subtract(money(b)), money(expected));
    }

    #[test]
    fn test_comparisons() {
        assert!(money("4.56").is_greater_than(money("4.55")));
        assert!(!money("4.55").is_greater_than(money("4.55")));
        assert!(money("0.00").is_zero());
        assert!(!money("0.01").is_zero());
        assert!(money("0.01").is_positive());
        assert!(!money("0.00").is_positive());
        assert!(!money("-0.01").is_positive());
    }

    #[test]
    fn test_min() {
        assert_eq!(money("1.00").min(money("2.00")), money("1.00"));
        assert_eq!(money("2.00").min(money("1.00")), money("1.00"));
    }

    #[test]
    fn test_comparison_happens_after_normalization() {
        // 1.004987654321 rounds to 1.00, so it does not exceed a 1.00 balance
        let requested = money("1.004987654321");
        let remaining = money("1.00");
        assert!(!requested.is_greater_than(remaining));
    }
}
