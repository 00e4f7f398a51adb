//! Scoring providers.
//!
//! Three independent external services feed the planner:
//!
//! - a delay estimator: `(train, station) -> minutes`
//! - a station comfort estimator: `station -> [0, 1]`
//! - a train reliability estimator: `train -> [0, 1]`
//!
//! They are injected as trait objects so tests can substitute
//! deterministic stubs. [`Scorers`] bundles them and absorbs provider
//! failures: a failed or out-of-range score becomes the documented neutral
//! default instead of failing the request.

mod delay;
mod facilities;
mod reliability;

use std::sync::Arc;

use tracing::warn;

use crate::domain::{StationCode, TrainId};

pub use delay::DelayHistory;
pub use facilities::{FacilityTable, StationFacilities};
pub use reliability::{PerformanceTable, TrainPerformance, TripRecord};

/// Score used for unknown stations and trains, and for failed lookups.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Delay used when the estimator fails.
pub const NEUTRAL_DELAY_MINS: i32 = 0;

/// Error from a scoring provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The provider can't be reached or its data is unusable
    #[error("scoring provider unavailable: {0}")]
    Unavailable(String),

    /// The provider didn't answer in time
    #[error("scoring provider timed out")]
    Timeout,
}

/// Predicts how late a train will be at a station.
pub trait DelayEstimator: Send + Sync {
    /// Expected delay in minutes.
    fn predict_delay(&self, train: &TrainId, station: &StationCode) -> Result<i32, ProviderError>;
}

/// Rates the facilities at a station.
pub trait StationComfort: Send + Sync {
    /// Comfort score in `[0, 1]`; 0.5 for unknown stations.
    fn comfort_score(&self, station: &StationCode) -> Result<f64, ProviderError>;
}

/// Rates how dependable a train has been historically.
pub trait TrainReliability: Send + Sync {
    /// Reliability score in `[0, 1]`; 0.5 for unknown trains.
    fn reliability_score(&self, train: &TrainId) -> Result<f64, ProviderError>;
}

/// Provider that knows nothing: neutral scores and no delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralScores;

impl DelayEstimator for NeutralScores {
    fn predict_delay(&self, _train: &TrainId, _station: &StationCode) -> Result<i32, ProviderError> {
        Ok(NEUTRAL_DELAY_MINS)
    }
}

impl StationComfort for NeutralScores {
    fn comfort_score(&self, _station: &StationCode) -> Result<f64, ProviderError> {
        Ok(NEUTRAL_SCORE)
    }
}

impl TrainReliability for NeutralScores {
    fn reliability_score(&self, _train: &TrainId) -> Result<f64, ProviderError> {
        Ok(NEUTRAL_SCORE)
    }
}

/// The injected scoring collaborators for one planner.
#[derive(Clone)]
pub struct Scorers {
    delay: Arc<dyn DelayEstimator>,
    comfort: Arc<dyn StationComfort>,
    reliability: Arc<dyn TrainReliability>,
}

impl Scorers {
    /// Bundle three providers.
    pub fn new(
        delay: Arc<dyn DelayEstimator>,
        comfort: Arc<dyn StationComfort>,
        reliability: Arc<dyn TrainReliability>,
    ) -> Self {
        Self {
            delay,
            comfort,
            reliability,
        }
    }

    /// Providers that return neutral values for everything.
    pub fn neutral() -> Self {
        let neutral = Arc::new(NeutralScores);
        Self::new(neutral.clone(), neutral.clone(), neutral)
    }

    /// Replace the delay estimator.
    pub fn with_delay(mut self, delay: Arc<dyn DelayEstimator>) -> Self {
        self.delay = delay;
        self
    }

    /// Replace the station comfort estimator.
    pub fn with_comfort(mut self, comfort: Arc<dyn StationComfort>) -> Self {
        self.comfort = comfort;
        self
    }

    /// Replace the train reliability estimator.
    pub fn with_reliability(mut self, reliability: Arc<dyn TrainReliability>) -> Self {
        self.reliability = reliability;
        self
    }

    /// Predicted delay, or zero if the estimator fails.
    pub fn predicted_delay(&self, train: &TrainId, station: &StationCode) -> i32 {
        match self.delay.predict_delay(train, station) {
            Ok(minutes) => minutes,
            Err(e) => {
                warn!(
                    train = %train,
                    station = %station,
                    error = %e,
                    "Delay estimate unavailable, assuming none"
                );
                NEUTRAL_DELAY_MINS
            }
        }
    }

    /// Station comfort, or neutral if the estimator fails.
    pub fn station_comfort(&self, station: &StationCode) -> f64 {
        let score = self.comfort.comfort_score(station);
        normalise(score, || format!("station {station}"))
    }

    /// Train reliability, or neutral if the estimator fails.
    pub fn train_reliability(&self, train: &TrainId) -> f64 {
        let score = self.reliability.reliability_score(train);
        normalise(score, || format!("train {train}"))
    }
}

impl Default for Scorers {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Clamp a provider score into `[0, 1]`, substituting neutral for failures.
fn normalise(score: Result<f64, ProviderError>, subject: impl Fn() -> String) -> f64 {
    match score {
        Ok(value) if value.is_nan() => {
            warn!(subject = %subject(), "Provider returned NaN, using neutral score");
            NEUTRAL_SCORE
        }
        Ok(value) => value.clamp(0.0, 1.0),
        Err(e) => {
            warn!(subject = %subject(), error = %e, "Score unavailable, using neutral score");
            NEUTRAL_SCORE
        }
    }
}
