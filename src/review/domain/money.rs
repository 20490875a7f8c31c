//! Decimal quantities used for payroll inputs.

use super::ReviewDomainError;
use bigdecimal::{BigDecimal, RoundingMode, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Scale applied to earnings.
const EARNINGS_SCALE: i64 = 2;

fn parse_decimal(raw: &str) -> Result<BigDecimal, ReviewDomainError> {
    BigDecimal::from_str(raw.trim()).map_err(|_| ReviewDomainError::InvalidDecimal(raw.to_owned()))
}

/// Hours worked on a submission; never negative.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "BigDecimal", into = "BigDecimal")]
pub struct Hours(BigDecimal);

impl Hours {
    /// Creates a validated hours value.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::NegativeHours`] for negative values.
    pub fn new(value: BigDecimal) -> Result<Self, ReviewDomainError> {
        if value < BigDecimal::zero() {
            return Err(ReviewDomainError::NegativeHours(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Parses hours from text such as `"7.5"`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::InvalidDecimal`] when the text is not a
    /// number, or [`ReviewDomainError::NegativeHours`] when it is negative.
    pub fn parse(raw: &str) -> Result<Self, ReviewDomainError> {
        Self::new(parse_decimal(raw)?)
    }

    /// Returns zero hours.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    /// Returns the decimal value.
    #[must_use]
    pub const fn value(&self) -> &BigDecimal {
        &self.0
    }
}

impl TryFrom<BigDecimal> for Hours {
    type Error = ReviewDomainError;

    fn try_from(value: BigDecimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hours> for BigDecimal {
    fn from(hours: Hours) -> Self {
        hours.0
    }
}

impl Add for Hours {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Earnings multiplier per hour; never negative.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "BigDecimal", into = "BigDecimal")]
pub struct Rate(BigDecimal);

impl Rate {
    /// Creates a validated rate.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::NegativeRate`] for negative values.
    pub fn new(value: BigDecimal) -> Result<Self, ReviewDomainError> {
        if value < BigDecimal::zero() {
            return Err(ReviewDomainError::NegativeRate(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Parses a rate from text such as `"12.50"`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::InvalidDecimal`] when the text is not a
    /// number, or [`ReviewDomainError::NegativeRate`] when it is negative.
    pub fn parse(raw: &str) -> Result<Self, ReviewDomainError> {
        Self::new(parse_decimal(raw)?)
    }

    /// Returns the decimal value.
    #[must_use]
    pub const fn value(&self) -> &BigDecimal {
        &self.0
    }
}

impl TryFrom<BigDecimal> for Rate {
    type Error = ReviewDomainError;

    fn try_from(value: BigDecimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rate> for BigDecimal {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derived earnings, rounded half-up to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Earnings(BigDecimal);

impl Earnings {
    /// Computes `hours × rate`.
    #[must_use]
    pub fn compute(hours: &Hours, rate: &Rate) -> Self {
        Self::rounded(hours.value() * rate.value())
    }

    /// Wraps a persisted earnings value, normalising its scale.
    #[must_use]
    pub fn from_persisted(value: BigDecimal) -> Self {
        Self::rounded(value)
    }

    /// Returns zero earnings.
    #[must_use]
    pub fn zero() -> Self {
        Self::rounded(BigDecimal::zero())
    }

    /// Returns the decimal value.
    #[must_use]
    pub const fn value(&self) -> &BigDecimal {
        &self.0
    }

    fn rounded(value: BigDecimal) -> Self {
        Self(value.with_scale_round(EARNINGS_SCALE, RoundingMode::HalfUp))
    }
}

impl Add for Earnings {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::rounded(self.0 + rhs.0)
    }
}

impl Sum for Earnings {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl fmt::Display for Earnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
