//! Search configuration for the journey planner.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Configuration parameters for journey search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of train changes allowed.
    /// A route has at most `max_connections + 1` legs.
    pub max_connections: usize,

    /// Enumeration stops once this many routes reach the destination.
    pub route_cap: usize,

    /// Maximum number of routes to return. Values above 10 are capped at 10.
    pub top_k: usize,

    /// Minimum connection time when the luggage buffer is requested (minutes).
    pub luggage_buffer_mins: i64,

    /// Planning deadline (milliseconds). `None` disables the deadline.
    pub timeout_ms: Option<u64>,

    /// Only extend a route with legs departing at or after its arrival.
    /// Off by default: every structurally valid route is a candidate and
    /// infeasible connections are left to the transfer filter.
    pub require_forward_connections: bool,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_connections: usize,
        route_cap: usize,
        top_k: usize,
        luggage_buffer_mins: i64,
        timeout_ms: Option<u64>,
    ) -> Self {
        Self {
            max_connections,
            route_cap,
            top_k,
            luggage_buffer_mins,
            timeout_ms,
            require_forward_connections: false,
        }
    }

    /// Most legs a route may have.
    pub fn max_legs(&self) -> usize {
        self.max_connections.saturating_add(1)
    }

    /// Returns the luggage buffer as a Duration.
    pub fn luggage_buffer(&self) -> Duration {
        Duration::minutes(self.luggage_buffer_mins)
    }

    /// Returns the planning deadline, if any.
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_ms.map(std::time::Duration::from_millis)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_connections: 2,
            route_cap: 28_000,
            top_k: 10,
            luggage_buffer_mins: 15,
            timeout_ms: Some(30_000), // 30 seconds
            require_forward_connections: false,
        }
    }
}
