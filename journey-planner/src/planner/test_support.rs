//! Fixtures shared by the planner tests.

use crate::catalog::StaticTimetable;
use crate::domain::{Fare, Leg, Offset, Route, StationCode, TrainId, TravelClass};

pub fn code(s: &str) -> StationCode {
    StationCode::parse(s).unwrap()
}

pub fn train(s: &str) -> TrainId {
    TrainId::parse(s).unwrap()
}

/// A 2A leg with the given timings and fare.
pub fn leg(train_id: &str, from: &str, to: &str, dep: i32, arr: i32, fare: u32) -> Leg {
    class_leg(train_id, from, to, dep, arr, fare, TravelClass::SecondAc)
}

pub fn class_leg(
    train_id: &str,
    from: &str,
    to: &str,
    dep: i32,
    arr: i32,
    fare: u32,
    class: TravelClass,
) -> Leg {
    Leg::new(
        train(train_id),
        code(from),
        code(to),
        Offset::from_minutes(dep),
        Offset::from_minutes(arr),
        Fare::from_units(fare),
        class,
    )
    .unwrap()
}

pub fn timetable(legs: Vec<Leg>) -> StaticTimetable {
    let mut timetable = StaticTimetable::new();
    for leg in legs {
        timetable.add_leg(leg);
    }
    timetable
}

pub fn route(legs: Vec<Leg>) -> Route {
    Route::from_legs(legs).unwrap()
}

/// The two-leg A -> B -> D network: 60 minutes, 30 minute change, 60 minutes.
pub fn abd_legs() -> Vec<Leg> {
    vec![
        leg("T1", "A", "B", 0, 60, 100),
        leg("T2", "B", "D", 90, 150, 200),
    ]
}

/// Station codes of a route's stops, origin first.
pub fn stops(route: &Route) -> Vec<String> {
    let mut stops = vec![route.origin().to_string()];
    stops.extend(route.legs().iter().map(|leg| leg.to().to_string()));
    stops
}
