//! Station code types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A validated station code (e.g. "NDLS", "BCT", "MAS").
///
/// Station codes are 1 to 8 uppercase ASCII letters or digits. The code is
/// reference counted so routes and visited sets can clone it cheaply.
///
/// # Examples
///
/// ```
/// use journey_planner::domain::StationCode;
///
/// let ndls = StationCode::parse("NDLS").unwrap();
/// assert_eq!(ndls.as_str(), "NDLS");
///
/// // Lowercase is rejected
/// assert!(StationCode::parse("ndls").is_err());
///
/// // Empty and overlong codes are rejected
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("ABCDEFGHI").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationCode(Arc<str>);

impl StationCode {
    /// Maximum length of a station code.
    pub const MAX_LEN: usize = 8;

    /// Parse a station code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() || s.len() > Self::MAX_LEN {
            return Err(InvalidStationCode {
                reason: "must be 1 to 8 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(InvalidStationCode {
                reason: "must be uppercase ASCII letters or digits",
            });
        }

        Ok(StationCode(Arc::from(s)))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationCode {
    type Error = InvalidStationCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        StationCode::parse(&s)
    }
}

impl From<StationCode> for String {
    fn from(code: StationCode) -> Self {
        code.0.to_string()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
