//! Train identity type.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid train identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train id: {reason}")]
pub struct InvalidTrainId {
    reason: &'static str,
}

/// A train identifier, usually the train number (e.g. "12951").
///
/// Identifiers are 1 to 16 ASCII letters or digits.
///
/// # Examples
///
/// ```
/// use journey_planner::domain::TrainId;
///
/// let rajdhani = TrainId::parse("12951").unwrap();
/// assert_eq!(rajdhani.as_str(), "12951");
///
/// assert!(TrainId::parse("").is_err());
/// assert!(TrainId::parse("12 951").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrainId(Arc<str>);

impl TrainId {
    /// Parse a train identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidTrainId> {
        if s.is_empty() || s.len() > 16 {
            return Err(InvalidTrainId {
                reason: "must be 1 to 16 characters",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidTrainId {
                reason: "must be ASCII letters or digits",
            });
        }

        Ok(TrainId(Arc::from(s)))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TrainId {
    type Error = InvalidTrainId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TrainId::parse(&s)
    }
}

impl From<TrainId> for String {
    fn from(id: TrainId) -> Self {
        id.0.to_string()
    }
}

impl fmt::Debug for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainId({})", self.as_str())
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
