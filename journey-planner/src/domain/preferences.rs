//! Traveller preferences and objective selection.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::TravelClass;

/// Error returned when preferences can never be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid preferences: {reason}")]
pub struct InvalidPreferences {
    reason: String,
}

/// Per-request constraints applied by the smart filters.
///
/// # Examples
///
/// ```
/// use journey_planner::domain::JourneyPreferences;
///
/// let prefs = JourneyPreferences::default();
/// assert_eq!(prefs.min_transfer_mins, 15);
/// assert_eq!(prefs.max_transfer_mins, 120);
/// assert!(prefs.validate().is_ok());
///
/// let backwards = JourneyPreferences {
///     min_transfer_mins: 60,
///     max_transfer_mins: 30,
///     ..JourneyPreferences::default()
/// };
/// assert!(backwards.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JourneyPreferences {
    /// Shortest acceptable connection (minutes, inclusive).
    pub min_transfer_mins: i64,

    /// Longest acceptable connection (minutes, inclusive).
    pub max_transfer_mins: i64,

    /// Classes every leg must be booked in.
    pub preferred_classes: Vec<TravelClass>,

    /// Require a luggage buffer on every connection.
    pub include_luggage_buffer: bool,
}

impl JourneyPreferences {
    /// Check the preferences are satisfiable.
    pub fn validate(&self) -> Result<(), InvalidPreferences> {
        if self.min_transfer_mins < 0 {
            return Err(InvalidPreferences {
                reason: format!(
                    "minimum transfer time {} is negative",
                    self.min_transfer_mins
                ),
            });
        }
        if self.min_transfer_mins > self.max_transfer_mins {
            return Err(InvalidPreferences {
                reason: format!(
                    "minimum transfer time {} exceeds maximum {}",
                    self.min_transfer_mins, self.max_transfer_mins
                ),
            });
        }
        if self.preferred_classes.is_empty() {
            return Err(InvalidPreferences {
                reason: "no acceptable travel classes".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the minimum transfer time as a Duration.
    pub fn min_transfer(&self) -> Duration {
        Duration::minutes(self.min_transfer_mins)
    }

    /// Returns the maximum transfer time as a Duration.
    pub fn max_transfer(&self) -> Duration {
        Duration::minutes(self.max_transfer_mins)
    }

    /// Returns true if `class` is on the allow-list.
    pub fn accepts_class(&self, class: &TravelClass) -> bool {
        self.preferred_classes.contains(class)
    }
}

impl Default for JourneyPreferences {
    fn default() -> Self {
        Self {
            min_transfer_mins: 15,
            max_transfer_mins: 120,
            preferred_classes: TravelClass::reserved(),
            include_luggage_buffer: true,
        }
    }
}

/// Error returned when parsing an unknown optimization mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown optimization mode: {0}")]
pub struct UnknownMode(String);

/// The metric used to rank candidate routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMode {
    /// Shortest total duration first.
    MinimumDuration,
    /// Cheapest ticket plan first (with split-ticketing).
    LowestCost,
    /// Highest comfort score first.
    Comfort,
}

impl FromStr for OptimizationMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duration" | "minimum_duration" => Ok(OptimizationMode::MinimumDuration),
            "cost" | "lowest_cost" => Ok(OptimizationMode::LowestCost),
            "comfort" => Ok(OptimizationMode::Comfort),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptimizationMode::MinimumDuration => "minimum_duration",
            OptimizationMode::LowestCost => "lowest_cost",
            OptimizationMode::Comfort => "comfort",
        };
        f.write_str(name)
    }
}
