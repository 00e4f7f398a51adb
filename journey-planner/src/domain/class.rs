//! Travel class type.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The class of accommodation a leg is booked in.
///
/// The four reserved classes with a comfort weighting get their own
/// variants; every other booking code (chair car, second sitting, ...) is
/// kept verbatim in `Other`.
///
/// # Examples
///
/// ```
/// use journey_planner::domain::TravelClass;
///
/// let class: TravelClass = "2A".parse().unwrap();
/// assert_eq!(class, TravelClass::SecondAc);
/// assert_eq!(class.comfort_weight(), 0.8);
///
/// let chair: TravelClass = "CC".parse().unwrap();
/// assert_eq!(chair.code(), "CC");
/// assert_eq!(chair.comfort_weight(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TravelClass {
    /// First class AC ("1A").
    FirstAc,
    /// AC two tier ("2A").
    SecondAc,
    /// AC three tier ("3A").
    ThirdAc,
    /// Sleeper ("SL").
    Sleeper,
    /// Any other booking code.
    Other(String),
}

impl TravelClass {
    /// Returns the booking code for this class.
    pub fn code(&self) -> &str {
        match self {
            TravelClass::FirstAc => "1A",
            TravelClass::SecondAc => "2A",
            TravelClass::ThirdAc => "3A",
            TravelClass::Sleeper => "SL",
            TravelClass::Other(code) => code,
        }
    }

    /// Fixed comfort weight used by comfort-mode ranking.
    pub fn comfort_weight(&self) -> f64 {
        match self {
            TravelClass::FirstAc => 1.0,
            TravelClass::SecondAc => 0.8,
            TravelClass::ThirdAc => 0.6,
            TravelClass::Sleeper => 0.4,
            TravelClass::Other(_) => 0.5,
        }
    }

    /// The reserved classes, best first.
    pub fn reserved() -> Vec<TravelClass> {
        vec![
            TravelClass::FirstAc,
            TravelClass::SecondAc,
            TravelClass::ThirdAc,
            TravelClass::Sleeper,
        ]
    }
}

impl From<&str> for TravelClass {
    fn from(code: &str) -> Self {
        match code {
            "1A" => TravelClass::FirstAc,
            "2A" => TravelClass::SecondAc,
            "3A" => TravelClass::ThirdAc,
            "SL" => TravelClass::Sleeper,
            other => TravelClass::Other(other.to_string()),
        }
    }
}

impl From<String> for TravelClass {
    fn from(code: String) -> Self {
        TravelClass::from(code.as_str())
    }
}

impl From<TravelClass> for String {
    fn from(class: TravelClass) -> Self {
        class.code().to_string()
    }
}

impl FromStr for TravelClass {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TravelClass::from(s))
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
