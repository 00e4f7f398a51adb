//! Fare amounts.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// A non-negative ticket price.
///
/// Fares are exact decimals so that summing many legs or ticket segments
/// never drifts.
///
/// # Examples
///
/// ```
/// use journey_planner::domain::Fare;
/// use rust_decimal::Decimal;
///
/// let a = Fare::new(Decimal::new(45050, 2)).unwrap(); // 450.50
/// let b = Fare::from_units(120);
/// assert_eq!((a + b).amount(), Decimal::new(57050, 2));
///
/// assert!(Fare::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Fare(Decimal);

impl Fare {
    /// Create a fare, rejecting negative amounts.
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::NegativeFare(amount));
        }
        Ok(Self(amount))
    }

    /// A fare of whole currency units.
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// The zero fare.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Sum of two fares, or `None` if the amount can't be represented.
    pub fn checked_add(self, rhs: Fare) -> Option<Fare> {
        self.0.checked_add(rhs.0).map(Fare)
    }
}

/// Saturates at the largest representable amount instead of overflowing.
impl Add for Fare {
    type Output = Fare;

    fn add(self, rhs: Fare) -> Self::Output {
        Fare(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Fare {
    fn sum<I: Iterator<Item = Fare>>(iter: I) -> Self {
        iter.fold(Fare::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Fare> for Fare {
    fn sum<I: Iterator<Item = &'a Fare>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl TryFrom<Decimal> for Fare {
    type Error = DomainError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Fare::new(amount)
    }
}

impl From<Fare> for Decimal {
    fn from(fare: Fare) -> Self {
        fare.0
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
