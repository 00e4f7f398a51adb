//! Objective optimizers.
//!
//! Each mode reduces the candidate routes to the best `top_k` under its own
//! metric, never more than [`MAX_RESULTS`]. All sorts are stable, so exact
//! ties keep discovery order.

use tracing::debug;

use super::cancel::Cancellation;
use super::search::PlanError;
use super::split::split_variants;
use crate::catalog::FareQuotes;
use crate::domain::{OptimizationMode, Route};
use crate::scoring::Scorers;

/// Most routes any optimizer returns, whatever `top_k` asks for.
pub const MAX_RESULTS: usize = 10;

/// Rank `routes` under `mode`, best first, keeping at most `top_k` (capped
/// at [`MAX_RESULTS`]).
///
/// # Errors
///
/// Only cancellation and timeout. Cost and comfort modes query providers
/// and check `cancel` once per candidate before doing so.
pub fn optimize<Q: FareQuotes + ?Sized>(
    routes: Vec<Route>,
    mode: OptimizationMode,
    quotes: &Q,
    scorers: &Scorers,
    top_k: usize,
    cancel: &Cancellation,
) -> Result<Vec<Route>, PlanError> {
    let candidates = routes.len();
    let ranked = match mode {
        OptimizationMode::MinimumDuration => by_duration(routes, top_k),
        OptimizationMode::LowestCost => by_cost(routes, quotes, top_k, cancel)?,
        OptimizationMode::Comfort => by_comfort(routes, scorers, top_k, cancel)?,
    };

    debug!(
        mode = %mode,
        candidates,
        kept = ranked.len(),
        "Optimization complete"
    );
    Ok(ranked)
}

/// Shortest total duration first.
pub fn by_duration(mut routes: Vec<Route>, top_k: usize) -> Vec<Route> {
    routes.sort_by_cached_key(Route::total_duration);
    routes.truncate(top_k.min(MAX_RESULTS));
    routes
}

/// Cheapest first, pooling every route's split-ticket variants.
pub fn by_cost<Q: FareQuotes + ?Sized>(
    routes: Vec<Route>,
    quotes: &Q,
    top_k: usize,
    cancel: &Cancellation,
) -> Result<Vec<Route>, PlanError> {
    let mut variants = Vec::with_capacity(routes.len());
    for route in &routes {
        cancel.check()?;
        variants.extend(split_variants(route, quotes));
    }

    variants.sort_by_cached_key(Route::total_cost);
    variants.truncate(top_k.min(MAX_RESULTS));
    Ok(variants)
}

/// Most comfortable first.
pub fn by_comfort(
    routes: Vec<Route>,
    scorers: &Scorers,
    top_k: usize,
    cancel: &Cancellation,
) -> Result<Vec<Route>, PlanError> {
    let mut scored = Vec::with_capacity(routes.len());
    for route in routes {
        cancel.check()?;
        scored.push((comfort_score(&route, scorers), route));
    }

    scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    Ok(scored
        .into_iter()
        .take(top_k.min(MAX_RESULTS))
        .map(|(_, route)| route)
        .collect())
}

/// Mean over legs of class weight plus the comfort of both end stations
/// plus the reliability of the train. Zero for a route with no legs.
///
/// # Examples
///
/// ```
/// use journey_planner::domain::{Fare, Leg, Offset, Route, StationCode, TrainId, TravelClass};
/// use journey_planner::planner::comfort_score;
/// use journey_planner::scoring::Scorers;
///
/// let leg = Leg::new(
///     TrainId::parse("T1").unwrap(),
///     StationCode::parse("A").unwrap(),
///     StationCode::parse("B").unwrap(),
///     Offset::from_minutes(0),
///     Offset::from_minutes(60),
///     Fare::from_units(100),
///     TravelClass::FirstAc,
/// )
/// .unwrap();
/// let route = Route::from_legs(vec![leg]).unwrap();
///
/// // 1.0 for first class, then 0.5 for each unknown station and the train
/// assert_eq!(comfort_score(&route, &Scorers::neutral()), 2.5);
/// ```
pub fn comfort_score(route: &Route, scorers: &Scorers) -> f64 {
    let legs = route.legs();
    if legs.is_empty() {
        return 0.0;
    }

    let total: f64 = legs
        .iter()
        .map(|leg| {
            leg.class().comfort_weight()
                + scorers.station_comfort(leg.from())
                + scorers.station_comfort(leg.to())
                + scorers.train_reliability(leg.train_id())
        })
        .sum();
    total / legs.len() as f64
}
