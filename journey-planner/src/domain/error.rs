//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from catalog and provider errors.

use rust_decimal::Decimal;

use super::StationCode;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Invalid leg construction (e.g., arrival before departure)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// A fare below zero
    #[error("fare must not be negative, got {0}")]
    NegativeFare(Decimal),

    /// Consecutive legs don't share a station
    #[error("stations {0} and {1} are not connected")]
    StationsNotConnected(StationCode, StationCode),

    /// Route has no legs
    #[error("route must have at least one leg")]
    EmptyRoute,

    /// Ticket segments don't cover the route exactly once
    #[error("invalid tickets: {0}")]
    InvalidTickets(&'static str),
}
