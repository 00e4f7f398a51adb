//! Train reliability scoring from trip history.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::{NEUTRAL_SCORE, ProviderError, TrainReliability};
use crate::domain::TrainId;

/// Trips at most this late count as on time.
const ON_TIME_TOLERANCE_MINS: i32 = 15;

/// On-time rate that earns full credit.
const ON_TIME_THRESHOLD: f64 = 0.8;

/// Average delay at which the delay component reaches zero.
const MAX_AVERAGE_DELAY_MINS: f64 = 120.0;

/// One observed run of a train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Arrival delay in minutes (ignored when cancelled).
    pub delay_minutes: i32,
    /// The run was cancelled.
    #[serde(default)]
    pub cancelled: bool,
    /// Passenger satisfaction in `[0, 1]`.
    pub satisfaction: f64,
}

/// Aggregated history for one train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainPerformance {
    pub total_trips: u32,
    pub on_time_count: u32,
    pub cancellation_count: u32,
    pub total_delay_minutes: i64,
    pub customer_satisfaction: f64,
}

impl Default for TrainPerformance {
    fn default() -> Self {
        Self {
            total_trips: 0,
            on_time_count: 0,
            cancellation_count: 0,
            total_delay_minutes: 0,
            customer_satisfaction: NEUTRAL_SCORE,
        }
    }
}

impl TrainPerformance {
    /// Fold one trip into the aggregate.
    pub fn record(&mut self, trip: &TripRecord) {
        self.total_trips += 1;

        if trip.cancelled {
            self.cancellation_count += 1;
        } else {
            if trip.delay_minutes <= ON_TIME_TOLERANCE_MINS {
                self.on_time_count += 1;
            }
            self.total_delay_minutes += i64::from(trip.delay_minutes);
        }

        let previous = f64::from(self.total_trips - 1);
        self.customer_satisfaction = (self.customer_satisfaction * previous + trip.satisfaction)
            / f64::from(self.total_trips);
    }

    /// Mean delay over trips that ran.
    pub fn average_delay(&self) -> f64 {
        let ran = self.total_trips - self.cancellation_count;
        if ran == 0 {
            return 0.0;
        }
        self.total_delay_minutes as f64 / f64::from(ran)
    }

    /// Weighted reliability score, capped at 1.0. Neutral with no history.
    ///
    /// Components: on-time rate (0.4), average delay (0.3), cancellation
    /// rate (0.2), satisfaction (0.1).
    pub fn reliability_score(&self) -> f64 {
        if self.total_trips == 0 {
            return NEUTRAL_SCORE;
        }
        let trips = f64::from(self.total_trips);

        let on_time_rate = f64::from(self.on_time_count) / trips;
        let on_time = if on_time_rate >= ON_TIME_THRESHOLD {
            1.0
        } else {
            on_time_rate / ON_TIME_THRESHOLD
        };

        let delay = (1.0 - self.average_delay() / MAX_AVERAGE_DELAY_MINS).max(0.0);
        let cancellation_rate = f64::from(self.cancellation_count) / trips;

        let score = 0.4 * on_time
            + 0.3 * delay
            + 0.2 * (1.0 - cancellation_rate)
            + 0.1 * self.customer_satisfaction;
        score.min(1.0)
    }
}

/// In-memory train reliability provider.
#[derive(Debug, Default)]
pub struct PerformanceTable {
    trains: RwLock<HashMap<TrainId, TrainPerformance>>,
}

impl PerformanceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one trip for a train.
    pub fn record_trip(&self, train: TrainId, trip: &TripRecord) -> Result<(), ProviderError> {
        let mut guard = self.trains.write().map_err(|_| poisoned())?;
        guard.entry(train).or_default().record(trip);
        Ok(())
    }

    /// Current aggregate for a train.
    pub fn performance(&self, train: &TrainId) -> Option<TrainPerformance> {
        self.trains
            .read()
            .ok()
            .and_then(|guard| guard.get(train).cloned())
    }
}

impl TrainReliability for PerformanceTable {
    fn reliability_score(&self, train: &TrainId) -> Result<f64, ProviderError> {
        let guard = self.trains.read().map_err(|_| poisoned())?;
        Ok(guard
            .get(train)
            .map(TrainPerformance::reliability_score)
            .unwrap_or(NEUTRAL_SCORE))
    }
}

fn poisoned() -> ProviderError {
    ProviderError::Unavailable("performance table lock poisoned".to_string())
}
