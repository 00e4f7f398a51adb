//! The planning pipeline.
//!
//! Enumerate every route, rank the candidates under the requested
//! objective, annotate the shortlist with predicted delays, then drop
//! routes that break the traveller's constraints.

use serde::Serialize;
use tracing::{info, warn};

use super::annotate::annotate;
use super::cancel::Cancellation;
use super::config::SearchConfig;
use super::enumerate::enumerate;
use super::filter::filter;
use super::optimize::optimize;
use crate::catalog::{CatalogError, FareQuotes, LegCatalog};
use crate::domain::{
    InvalidPreferences, JourneyPreferences, OptimizationMode, Route, StationCode,
};
use crate::scoring::Scorers;

/// Error from journey planning.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// Preferences that no route could satisfy
    #[error(transparent)]
    InvalidPreferences(#[from] InvalidPreferences),

    /// Invalid planning request
    #[error("invalid plan request: {0}")]
    InvalidRequest(String),

    /// The leg catalog failed, so no search is possible
    #[error("failed to fetch legs from {station}: {source}")]
    Catalog {
        station: StationCode,
        source: CatalogError,
    },

    /// The caller cancelled the request
    #[error("planning cancelled")]
    Cancelled,

    /// Planning ran past its deadline
    #[error("planning timed out")]
    Timeout,

    /// The worker running the pipeline stopped without an answer
    #[error("planning worker failed: {0}")]
    WorkerFailed(String),
}

/// Request for a journey plan.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Where the journey starts.
    pub source: StationCode,

    /// Where the journey ends.
    pub destination: StationCode,

    /// The objective to rank by.
    pub mode: OptimizationMode,

    /// Constraints every returned route must meet.
    pub preferences: JourneyPreferences,
}

impl PlanRequest {
    /// Create a request with default preferences.
    pub fn new(source: StationCode, destination: StationCode, mode: OptimizationMode) -> Self {
        Self {
            source,
            destination,
            mode,
            preferences: JourneyPreferences::default(),
        }
    }

    /// Replace the preferences.
    pub fn with_preferences(mut self, preferences: JourneyPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.source == self.destination {
            return Err(PlanError::InvalidRequest(format!(
                "source and destination are both {}",
                self.source
            )));
        }
        self.preferences.validate()?;
        Ok(())
    }
}

/// Result of journey planning.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// Surviving routes, best first.
    pub routes: Vec<Route>,

    /// Number of routes the enumerator accepted.
    pub candidates: usize,

    /// Number of frontier routes explored.
    pub routes_explored: usize,

    /// Enumeration stopped early at the route cap, so better routes may
    /// exist.
    pub cap_reached: bool,
}

/// Journey planner over a leg catalog and fare source.
pub struct Planner<C, Q> {
    catalog: C,
    fares: Q,
    scorers: Scorers,
    config: SearchConfig,
}

impl<C: LegCatalog, Q: FareQuotes> Planner<C, Q> {
    /// Create a new planner.
    pub fn new(catalog: C, fares: Q, scorers: Scorers, config: SearchConfig) -> Self {
        Self {
            catalog,
            fares,
            scorers,
            config,
        }
    }

    /// The search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The leg catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Plan a journey on the current thread, under the configured timeout.
    pub fn plan_blocking(&self, request: &PlanRequest) -> Result<Plan, PlanError> {
        self.plan(request, &Cancellation::from_timeout(self.config.timeout()))
    }

    /// Plan a journey on the current thread.
    ///
    /// Blocks for as long as the catalog and scoring providers do. `cancel`
    /// is checked before every provider call.
    pub fn plan(&self, request: &PlanRequest, cancel: &Cancellation) -> Result<Plan, PlanError> {
        request.validate()?;

        let enumeration = enumerate(
            &self.catalog,
            &request.source,
            &request.destination,
            &self.config,
            cancel,
        )?;
        let candidates = enumeration.routes.len();

        let ranked = optimize(
            enumeration.routes,
            request.mode,
            &self.fares,
            &self.scorers,
            self.config.top_k,
            cancel,
        )?;
        let annotated = annotate(ranked, &self.scorers, cancel)?;
        let routes = filter(
            annotated,
            &request.preferences,
            self.config.luggage_buffer(),
        );

        if enumeration.cap_reached {
            warn!(
                source = %request.source,
                destination = %request.destination,
                "Plan is based on an incomplete route set"
            );
        }
        info!(
            source = %request.source,
            destination = %request.destination,
            mode = %request.mode,
            candidates,
            routes = routes.len(),
            "Journey planned"
        );

        Ok(Plan {
            routes,
            candidates,
            routes_explored: enumeration.routes_explored,
            cap_reached: enumeration.cap_reached,
        })
    }
}
