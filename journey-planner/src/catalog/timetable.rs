//! In-memory timetable loaded from JSON.
//!
//! The document format is:
//!
//! ```json
//! {
//!   "legs": [
//!     { "train_id": "12951", "train_name": "Rajdhani", "from": "BCT", "to": "NDLS",
//!       "departure": 1020, "arrival": 1952, "platform": "3", "fare": 3065, "class": "2A" }
//!   ],
//!   "through_fares": [
//!     { "from": "BCT", "to": "NDLS", "class": "2A", "fare": 2900 }
//!   ]
//! }
//! ```
//!
//! `through_fares` is optional and prices tickets that span several legs.
//! A leg that fails validation (arrival before departure, same origin and
//! destination, bad codes) is skipped with a warning; the rest of the
//! document still loads.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use super::{CatalogError, FareQuotes, LegCatalog};
use crate::domain::{Fare, Leg, StationCode, TravelClass};

/// Errors from loading a timetable document.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// Reading the file failed
    #[error("failed to read timetable: {0}")]
    Io(#[from] std::io::Error),

    /// The document is malformed
    #[error("invalid timetable JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct TimetableDocument {
    legs: Vec<serde_json::Value>,
    #[serde(default)]
    through_fares: Vec<ThroughFare>,
}

#[derive(Deserialize)]
struct ThroughFare {
    from: StationCode,
    to: StationCode,
    class: TravelClass,
    fare: Fare,
}

/// Key for a multi-leg ticket: (origin, destination, class).
type FareKey = (StationCode, StationCode, TravelClass);

/// A fixed schedule snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticTimetable {
    /// Outbound legs per station, in insertion order.
    departures: HashMap<StationCode, Vec<Arc<Leg>>>,

    /// Prices for tickets spanning several legs.
    through_fares: HashMap<FareKey, Fare>,
}

impl StaticTimetable {
    /// Create an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a timetable document.
    pub fn from_json_str(json: &str) -> Result<Self, TimetableError> {
        let document: TimetableDocument = serde_json::from_str(json)?;
        let mut timetable = Self::new();
        for (index, record) in document.legs.into_iter().enumerate() {
            match serde_json::from_value::<Leg>(record) {
                Ok(leg) => timetable.add_leg(leg),
                Err(e) => warn!(index, error = %e, "Skipping invalid timetable leg"),
            }
        }
        for fare in document.through_fares {
            timetable.add_through_fare(fare.from, fare.to, fare.class, fare.fare);
        }
        debug!(
            legs = timetable.leg_count(),
            stations = timetable.departures.len(),
            "Loaded timetable"
        );
        Ok(timetable)
    }

    /// Read and parse a timetable document from a file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Add a leg.
    pub fn add_leg(&mut self, leg: Leg) {
        self.departures
            .entry(leg.from().clone())
            .or_default()
            .push(Arc::new(leg));
    }

    /// Add the price of one ticket from `from` to `to` in `class`.
    pub fn add_through_fare(
        &mut self,
        from: StationCode,
        to: StationCode,
        class: TravelClass,
        fare: Fare,
    ) {
        self.through_fares.insert((from, to, class), fare);
    }

    /// Total number of legs.
    pub fn leg_count(&self) -> usize {
        self.departures.values().map(Vec::len).sum()
    }

    /// Returns true if the timetable has no legs.
    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }
}

impl LegCatalog for StaticTimetable {
    fn legs_from(&self, station: &StationCode) -> Result<Vec<Arc<Leg>>, CatalogError> {
        Ok(self.departures.get(station).cloned().unwrap_or_default())
    }
}

impl FareQuotes for StaticTimetable {
    /// Quotes a ticket when every leg is in the same class and a fare is
    /// listed for the segment's endpoints.
    fn segment_fare(&self, legs: &[&Leg]) -> Option<Fare> {
        let (first, last) = (legs.first()?, legs.last()?);
        let class = first.class();
        if legs.iter().any(|leg| leg.class() != class) {
            return None;
        }
        self.through_fares
            .get(&(first.from().clone(), last.to().clone(), class.clone()))
            .copied()
    }
}
