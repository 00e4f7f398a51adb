//! Delay estimation from recent observations.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use super::{DelayEstimator, NEUTRAL_DELAY_MINS, ProviderError};
use crate::domain::{StationCode, TrainId};

/// Observations kept per train (and per train at a station).
const DEFAULT_WINDOW: usize = 24;

#[derive(Debug, Default)]
struct Observations {
    by_train: HashMap<TrainId, VecDeque<i32>>,
    by_stop: HashMap<(TrainId, StationCode), VecDeque<i32>>,
}

/// Delay estimator that predicts the mean of recent delays.
///
/// History recorded at the queried station wins over the train's history
/// elsewhere. With no history at all the prediction is zero.
#[derive(Debug)]
pub struct DelayHistory {
    window: usize,
    observations: RwLock<Observations>,
}

impl DelayHistory {
    /// Create an estimator keeping the default 24 observations.
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }

    /// Create an estimator keeping `window` observations (at least one).
    pub fn with_window(window: usize) -> Self {
        Self {
            window: window.max(1),
            observations: RwLock::new(Observations::default()),
        }
    }

    /// Record an observed delay for `train` at `station`.
    pub fn record(
        &self,
        train: &TrainId,
        station: &StationCode,
        delay_minutes: i32,
    ) -> Result<(), ProviderError> {
        let mut guard = self.observations.write().map_err(|_| poisoned())?;
        let window = self.window;

        push_bounded(
            guard.by_train.entry(train.clone()).or_default(),
            delay_minutes,
            window,
        );
        push_bounded(
            guard
                .by_stop
                .entry((train.clone(), station.clone()))
                .or_default(),
            delay_minutes,
            window,
        );
        Ok(())
    }
}

impl Default for DelayHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayEstimator for DelayHistory {
    fn predict_delay(&self, train: &TrainId, station: &StationCode) -> Result<i32, ProviderError> {
        let guard = self.observations.read().map_err(|_| poisoned())?;

        let history = guard
            .by_stop
            .get(&(train.clone(), station.clone()))
            .or_else(|| guard.by_train.get(train));

        Ok(history.map(mean_minutes).unwrap_or(NEUTRAL_DELAY_MINS))
    }
}

fn push_bounded(queue: &mut VecDeque<i32>, value: i32, window: usize) {
    queue.push_back(value);
    while queue.len() > window {
        queue.pop_front();
    }
}

fn mean_minutes(history: &VecDeque<i32>) -> i32 {
    if history.is_empty() {
        return NEUTRAL_DELAY_MINS;
    }
    let total: i64 = history.iter().map(|&d| i64::from(d)).sum();
    (total as f64 / history.len() as f64).round() as i32
}

fn poisoned() -> ProviderError {
    ProviderError::Unavailable("delay history lock poisoned".to_string())
}
