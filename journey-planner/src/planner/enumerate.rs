//! Route enumeration by breadth-first search over the leg graph.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::cancel::Cancellation;
use super::config::SearchConfig;
use super::search::PlanError;
use crate::catalog::LegCatalog;
use crate::domain::{Route, StationCode};

/// Routes found by [`enumerate`].
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    /// Routes reaching the destination, in discovery order.
    pub routes: Vec<Route>,

    /// Number of frontier routes popped.
    pub routes_explored: usize,

    /// The search stopped early at the route cap.
    pub cap_reached: bool,
}

/// Find every route from `source` to `destination`.
///
/// The frontier is FIFO, starting from the zero-leg route at `source`, so
/// routes are discovered in order of leg count and, within a level, in
/// catalog order. A popped route ending at `destination` is accepted and
/// not extended. A route is never extended to a station it already visits
/// and never beyond `config.max_legs()` legs.
///
/// The search stops once `config.route_cap` routes are accepted; the
/// result then reports `cap_reached`. An unreachable destination yields an
/// empty result, not an error.
///
/// # Errors
///
/// Catalog failures are fatal. Cancellation and the deadline are checked
/// at every frontier pop, before any catalog query.
pub fn enumerate<C: LegCatalog + ?Sized>(
    catalog: &C,
    source: &StationCode,
    destination: &StationCode,
    config: &SearchConfig,
    cancel: &Cancellation,
) -> Result<Enumeration, PlanError> {
    let mut result = Enumeration::default();
    if config.route_cap == 0 {
        result.cap_reached = true;
        return Ok(result);
    }

    let max_legs = config.max_legs();
    let mut frontier: VecDeque<Route> = VecDeque::from([Route::root(source.clone())]);

    while let Some(route) = frontier.pop_front() {
        cancel.check()?;
        result.routes_explored += 1;

        if route.last_station() == Some(destination) {
            result.routes.push(route);
            if result.routes.len() >= config.route_cap {
                warn!(
                    source = %source,
                    destination = %destination,
                    cap = config.route_cap,
                    "Route cap reached, stopping enumeration early"
                );
                result.cap_reached = true;
                break;
            }
            continue;
        }

        // Dead end: no room for another leg
        if route.len() >= max_legs {
            continue;
        }

        let station = route.current_station();
        let departures = catalog
            .legs_from(station)
            .map_err(|err| PlanError::Catalog {
                station: station.clone(),
                source: err,
            })?;

        trace!(
            station = %station,
            departures = departures.len(),
            legs = route.len(),
            "Exploring station"
        );

        let arrival = route.arrival();
        for leg in departures {
            if route.visits(leg.to()) {
                continue;
            }
            if config.require_forward_connections
                && arrival.is_some_and(|arrival| leg.departure() < arrival)
            {
                continue;
            }

            match route.extend(Arc::clone(&leg)) {
                Ok(next) => frontier.push_back(next),
                Err(e) => {
                    debug!(
                        station = %station,
                        train = %leg.train_id(),
                        error = %e,
                        "Catalog returned a leg from another station, skipping"
                    );
                }
            }
        }
    }

    debug!(
        routes = result.routes.len(),
        routes_explored = result.routes_explored,
        cap_reached = result.cap_reached,
        "Enumeration complete"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::domain::Leg;
    use crate::planner::test_support::*;

    fn run(legs: Vec<Leg>, from: &str, to: &str, config: &SearchConfig) -> Enumeration {
        enumerate(
            &timetable(legs),
            &code(from),
            &code(to),
            config,
            &Cancellation::none(),
        )
        .unwrap()
    }

    #[test]
    fn finds_two_leg_route() {
        let result = run(abd_legs(), "A", "D", &SearchConfig::default());

        assert_eq!(result.routes.len(), 1);
        assert_eq!(stops(&result.routes[0]), vec!["A", "B", "D"]);
        assert!(!result.cap_reached);
    }

    #[test]
    fn direct_routes_come_first() {
        let mut legs = abd_legs();
        legs.push(leg("T3", "A", "D", 0, 300, 50));

        let result = run(legs, "A", "D", &SearchConfig::default());

        assert_eq!(result.routes.len(), 2);
        assert_eq!(result.routes[0].len(), 1);
        assert_eq!(result.routes[1].len(), 2);
    }

    #[test]
    fn zero_connections_means_direct_only() {
        let mut legs = abd_legs();
        legs.push(leg("T3", "A", "D", 0, 300, 50));
        let config = SearchConfig {
            max_connections: 0,
            ..SearchConfig::default()
        };

        let result = run(legs, "A", "D", &config);

        assert_eq!(result.routes.len(), 1);
        assert_eq!(stops(&result.routes[0]), vec!["A", "D"]);
    }

    #[test]
    fn respects_max_connections() {
        // A -> B -> C -> D -> E needs three changes
        let legs = vec![
            leg("T1", "A", "B", 0, 10, 1),
            leg("T2", "B", "C", 20, 30, 1),
            leg("T3", "C", "D", 40, 50, 1),
            leg("T4", "D", "E", 60, 70, 1),
        ];

        let two = run(legs.clone(), "A", "E", &SearchConfig::default());
        assert!(two.routes.is_empty());

        let three = SearchConfig {
            max_connections: 3,
            ..SearchConfig::default()
        };
        let found = run(legs, "A", "E", &three);
        assert_eq!(found.routes.len(), 1);
        assert_eq!(found.routes[0].len(), 4);
    }

    #[test]
    fn no_cycles() {
        // B -> A -> ... would revisit the origin
        let legs = vec![
            leg("T1", "A", "B", 0, 10, 1),
            leg("T2", "B", "A", 20, 30, 1),
            leg("T3", "B", "C", 20, 30, 1),
            leg("T4", "C", "B", 40, 50, 1),
            leg("T5", "C", "D", 40, 50, 1),
        ];
        let config = SearchConfig {
            max_connections: 5,
            ..SearchConfig::default()
        };

        let result = run(legs, "A", "D", &config);

        assert_eq!(result.routes.len(), 1);
        assert_eq!(stops(&result.routes[0]), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn visited_tracking_is_per_route() {
        // Both branches pass through C; a global visited set would drop one
        let legs = vec![
            leg("T1", "A", "B", 0, 10, 1),
            leg("T2", "A", "X", 0, 10, 1),
            leg("T3", "B", "C", 20, 30, 1),
            leg("T4", "X", "C", 20, 30, 1),
            leg("T5", "C", "D", 40, 50, 1),
        ];
        let config = SearchConfig {
            max_connections: 3,
            ..SearchConfig::default()
        };

        let result = run(legs, "A", "D", &config);

        assert_eq!(result.routes.len(), 2);
        assert_eq!(stops(&result.routes[0]), vec!["A", "B", "C", "D"]);
        assert_eq!(stops(&result.routes[1]), vec!["A", "X", "C", "D"]);
    }

    #[test]
    fn backwards_connections_kept_by_default() {
        // The B -> D train leaves before the A -> B train arrives
        let legs = vec![
            leg("T1", "A", "B", 0, 60, 1),
            leg("T2", "B", "D", 30, 90, 1),
        ];

        let structural = run(legs.clone(), "A", "D", &SearchConfig::default());
        assert_eq!(structural.routes.len(), 1);

        let forward = SearchConfig {
            require_forward_connections: true,
            ..SearchConfig::default()
        };
        assert!(run(legs, "A", "D", &forward).routes.is_empty());
    }

    #[test]
    fn unreachable_destination_is_empty() {
        let result = run(abd_legs(), "A", "Z", &SearchConfig::default());
        assert!(result.routes.is_empty());
        assert!(!result.cap_reached);

        let nothing_out = run(abd_legs(), "D", "A", &SearchConfig::default());
        assert!(nothing_out.routes.is_empty());
        assert_eq!(nothing_out.routes_explored, 1);
    }

    #[test]
    fn stops_at_route_cap() {
        let legs: Vec<Leg> = (0..20)
            .map(|i| leg(&format!("T{i}"), "A", "D", i, i + 60, 10))
            .collect();
        let config = SearchConfig {
            route_cap: 5,
            ..SearchConfig::default()
        };

        let result = run(legs, "A", "D", &config);

        assert_eq!(result.routes.len(), 5);
        assert!(result.cap_reached);
        // Earliest discovered are kept
        assert_eq!(result.routes[0].legs()[0].train_id().as_str(), "T0");
    }

    #[test]
    fn zero_cap_returns_nothing() {
        let config = SearchConfig {
            route_cap: 0,
            ..SearchConfig::default()
        };
        let result = run(abd_legs(), "A", "D", &config);
        assert!(result.routes.is_empty());
        assert!(result.cap_reached);
    }

    #[test]
    fn catalog_failure_is_fatal() {
        struct Offline;

        impl LegCatalog for Offline {
            fn legs_from(&self, _: &StationCode) -> Result<Vec<Arc<Leg>>, CatalogError> {
                Err(CatalogError::Unavailable("offline".into()))
            }
        }

        let err = enumerate(
            &Offline,
            &code("A"),
            &code("D"),
            &SearchConfig::default(),
            &Cancellation::none(),
        )
        .unwrap_err();

        assert!(matches!(err, PlanError::Catalog { ref station, .. } if station.as_str() == "A"));
    }

    #[test]
    fn cancelled_before_first_query() {
        struct Panicking;

        impl LegCatalog for Panicking {
            fn legs_from(&self, _: &StationCode) -> Result<Vec<Arc<Leg>>, CatalogError> {
                panic!("catalog queried after cancellation");
            }
        }

        let cancel = Cancellation::none();
        cancel.cancel();

        let err = enumerate(
            &Panicking,
            &code("A"),
            &code("D"),
            &SearchConfig::default(),
            &cancel,
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::Cancelled));
    }
}
