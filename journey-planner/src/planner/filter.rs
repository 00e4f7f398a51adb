//! Smart filters applied to the ranked shortlist.
//!
//! A route survives only if it passes every check. The checks are pure
//! predicates, so filtering preserves order and is idempotent.

use chrono::Duration;
use tracing::debug;

use crate::domain::{JourneyPreferences, Route};

/// Keep the routes that satisfy the traveller's preferences.
///
/// `luggage_buffer` is the minimum connection enforced when the
/// preferences ask for a luggage buffer.
pub fn filter(
    routes: Vec<Route>,
    preferences: &JourneyPreferences,
    luggage_buffer: Duration,
) -> Vec<Route> {
    let before = routes.len();
    let kept: Vec<Route> = routes
        .into_iter()
        .filter(|route| passes(route, preferences, luggage_buffer))
        .collect();

    debug!(before, after = kept.len(), "Filtering complete");
    kept
}

/// Returns true if `route` passes every check.
pub fn passes(route: &Route, preferences: &JourneyPreferences, luggage_buffer: Duration) -> bool {
    transfers_within_bounds(route, preferences)
        && classes_accepted(route, preferences)
        && (!preferences.include_luggage_buffer || luggage_buffer_met(route, luggage_buffer))
}

/// Every connection lies within the preferred transfer window, inclusive.
/// Routes with a single leg have no connections and pass.
pub fn transfers_within_bounds(route: &Route, preferences: &JourneyPreferences) -> bool {
    let (min, max) = (preferences.min_transfer(), preferences.max_transfer());
    route
        .transfers()
        .into_iter()
        .all(|gap| gap >= min && gap <= max)
}

/// Every leg is booked in an accepted class.
pub fn classes_accepted(route: &Route, preferences: &JourneyPreferences) -> bool {
    route
        .legs()
        .iter()
        .all(|leg| preferences.accepts_class(leg.class()))
}

/// Every connection leaves at least `buffer` to move luggage. The last leg
/// has no onward connection and always passes.
pub fn luggage_buffer_met(route: &Route, buffer: Duration) -> bool {
    route.transfers().into_iter().all(|gap| gap >= buffer)
}
