//! Leg catalog adapter.
//!
//! The planner never owns schedule data. It asks a [`LegCatalog`] for the
//! legs leaving a station and, when pricing split tickets, asks a
//! [`FareQuotes`] source what a ticket over several legs would cost.
//!
//! [`StaticTimetable`] is an in-memory implementation of both, loaded from
//! JSON, for tests and offline use.

mod timetable;

use std::sync::Arc;

use crate::domain::{Fare, Leg, StationCode};

pub use timetable::{StaticTimetable, TimetableError};

/// Error from a leg catalog lookup.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// The backing schedule source can't be reached
    #[error("leg catalog unavailable: {0}")]
    Unavailable(String),

    /// The lookup for one station failed
    #[error("lookup for {station} failed: {message}")]
    Lookup {
        station: StationCode,
        message: String,
    },
}

/// Source of outbound legs for a station.
///
/// This abstraction allows the planner to be tested with mock data.
/// Implementations must behave like a pure query: the same station yields
/// the same legs in the same order for the lifetime of a planning request.
pub trait LegCatalog: Send + Sync {
    /// Get every leg departing `station`. May be empty.
    fn legs_from(&self, station: &StationCode) -> Result<Vec<Arc<Leg>>, CatalogError>;
}

impl<T: LegCatalog + ?Sized> LegCatalog for Arc<T> {
    fn legs_from(&self, station: &StationCode) -> Result<Vec<Arc<Leg>>, CatalogError> {
        (**self).legs_from(station)
    }
}

impl<T: LegCatalog + ?Sized> LegCatalog for &T {
    fn legs_from(&self, station: &StationCode) -> Result<Vec<Arc<Leg>>, CatalogError> {
        (**self).legs_from(station)
    }
}

/// Source of prices for tickets spanning several consecutive legs.
pub trait FareQuotes: Send + Sync {
    /// Price of a single ticket covering `legs` end to end.
    ///
    /// Returns `None` when no such ticket is sold; the caller then prices
    /// the segment as the sum of its leg fares.
    fn segment_fare(&self, legs: &[&Leg]) -> Option<Fare>;
}

impl<T: FareQuotes + ?Sized> FareQuotes for Arc<T> {
    fn segment_fare(&self, legs: &[&Leg]) -> Option<Fare> {
        (**self).segment_fare(legs)
    }
}

/// Fare source that sells no multi-leg tickets.
///
/// With this source every route is priced at the sum of its leg fares.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegFaresOnly;

impl FareQuotes for LegFaresOnly {
    fn segment_fare(&self, _legs: &[&Leg]) -> Option<Fare> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogError::Unavailable("connection refused".into());
        assert_eq!(err.to_string(), "leg catalog unavailable: connection refused");

        let err = CatalogError::Lookup {
            station: StationCode::parse("NDLS").unwrap(),
            message: "timeout".into(),
        };
        assert_eq!(err.to_string(), "lookup for NDLS failed: timeout");
    }

    #[test]
    fn leg_fares_only_quotes_nothing() {
        assert!(LegFaresOnly.segment_fare(&[]).is_none());
    }
}
