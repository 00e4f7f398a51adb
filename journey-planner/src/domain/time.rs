//! Timetable offsets.
//!
//! Schedule data expresses every departure and arrival as whole minutes from
//! a reference midnight. Overnight legs simply carry offsets past 1440.

use std::fmt;
use std::ops::Add;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Minutes after the reference midnight.
///
/// # Examples
///
/// ```
/// use journey_planner::domain::Offset;
///
/// let dep = Offset::parse_hhmm("22:30", 0).unwrap();
/// let arr = Offset::parse_hhmm("06:15", 1).unwrap();
/// assert_eq!(arr.signed_duration_since(dep).num_minutes(), 465);
/// assert_eq!(arr.to_string(), "06:15+1");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Offset(i32);

impl Offset {
    /// Minutes in one day.
    pub const DAY: i32 = 24 * 60;

    /// Create an offset from a raw minute count.
    pub fn from_minutes(minutes: i32) -> Self {
        Self(minutes)
    }

    /// Parse "HH:MM" on the given day after the reference midnight.
    pub fn parse_hhmm(s: &str, day: i32) -> Result<Self, TimeError> {
        let (hours, minutes) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let hour: i32 = hours
            .parse()
            .map_err(|_| TimeError::new("invalid hour digits"))?;
        let minute: i32 = minutes
            .parse()
            .map_err(|_| TimeError::new("invalid minute digits"))?;
        if !(0..24).contains(&hour) {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if !(0..60).contains(&minute) {
            return Err(TimeError::new("minute must be 0-59"));
        }

        day.checked_mul(Self::DAY)
            .and_then(|start| start.checked_add(hour * 60 + minute))
            .map(Self)
            .ok_or_else(|| TimeError::new("day is out of range"))
    }

    /// Returns the raw minute count.
    pub fn minutes(&self) -> i32 {
        self.0
    }

    /// Signed duration from `earlier` to `self`.
    pub fn signed_duration_since(&self, earlier: Offset) -> Duration {
        Duration::minutes(i64::from(self.0) - i64::from(earlier.0))
    }
}

impl Add<Duration> for Offset {
    type Output = Offset;

    fn add(self, rhs: Duration) -> Self::Output {
        let minutes = i64::from(self.0) + rhs.num_minutes();
        Offset(minutes.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }
}

impl fmt::Debug for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Offset({})", self)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = self.0.div_euclid(Self::DAY);
        let within = self.0.rem_euclid(Self::DAY);
        write!(f, "{:02}:{:02}", within / 60, within % 60)?;
        if day != 0 {
            write!(f, "{:+}", day)?;
        }
        Ok(())
    }
}
