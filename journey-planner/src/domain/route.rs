//! Route types.
//!
//! A `Route` is an ordered chain of legs from an origin station. Routes are
//! persistent: [`Route::extend`] builds a new route that points at the
//! unchanged prefix of the old one, so breadth-first search can fan out
//! many branches from one prefix without copying leg histories and without
//! one branch ever seeing another's extension.

use std::sync::Arc;

use chrono::Duration;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{DomainError, Fare, Leg, Offset, StationCode};

/// One node of the persistent leg chain. The newest leg is at the head.
#[derive(Debug)]
struct Link {
    leg: Arc<Leg>,
    prev: Option<Arc<Link>>,
}

/// A separately purchased ticket covering a contiguous run of legs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Ticket {
    /// Index of the first leg covered.
    pub first_leg: usize,
    /// Number of consecutive legs covered (at least one).
    pub leg_count: usize,
    /// Boarding station of the first covered leg.
    pub from: StationCode,
    /// Alighting station of the last covered leg.
    pub to: StationCode,
    /// Price of this ticket.
    pub fare: Fare,
}

/// An itinerary: an origin station plus zero or more contiguous legs.
///
/// A route with zero legs is only used as the root of a search frontier.
///
/// # Invariants
///
/// - `legs[i].to() == legs[i + 1].from()` for all `i`
/// - The first leg departs from `origin`
/// - When present, tickets cover every leg exactly once, in order
#[derive(Debug, Clone)]
pub struct Route {
    origin: StationCode,
    head: Option<Arc<Link>>,
    len: usize,
    tickets: Option<Arc<[Ticket]>>,
}

impl Route {
    /// Creates the zero-leg root route at `origin`.
    pub fn root(origin: StationCode) -> Self {
        Self {
            origin,
            head: None,
            len: 0,
            tickets: None,
        }
    }

    /// Constructs a route from legs in travel order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the list is empty or consecutive legs don't connect.
    ///
    /// # Examples
    ///
    /// ```
    /// use journey_planner::domain::{Fare, Leg, Offset, Route, StationCode, TrainId, TravelClass};
    ///
    /// let code = |s| StationCode::parse(s).unwrap();
    /// let leg = |from, to, dep, arr| {
    ///     Leg::new(
    ///         TrainId::parse("T1").unwrap(),
    ///         code(from),
    ///         code(to),
    ///         Offset::from_minutes(dep),
    ///         Offset::from_minutes(arr),
    ///         Fare::from_units(100),
    ///         TravelClass::SecondAc,
    ///     )
    ///     .unwrap()
    /// };
    ///
    /// let route = Route::from_legs(vec![leg("A", "B", 0, 60), leg("B", "D", 90, 150)]).unwrap();
    /// assert_eq!(route.len(), 2);
    /// assert_eq!(route.total_duration().num_minutes(), 150);
    /// assert_eq!(route.last_station(), Some(&code("D")));
    ///
    /// // Legs that don't connect are rejected
    /// assert!(Route::from_legs(vec![leg("A", "B", 0, 60), leg("C", "D", 90, 150)]).is_err());
    /// ```
    pub fn from_legs(legs: Vec<Leg>) -> Result<Self, DomainError> {
        let origin = legs
            .first()
            .map(|leg| leg.from().clone())
            .ok_or(DomainError::EmptyRoute)?;

        legs.into_iter()
            .try_fold(Route::root(origin), |route, leg| route.extend(Arc::new(leg)))
    }

    /// Returns a new route equal to this one plus `leg`.
    ///
    /// The new route shares this route's legs; `self` is unchanged. Any
    /// ticket plan is dropped since it no longer covers the route.
    pub fn extend(&self, leg: Arc<Leg>) -> Result<Self, DomainError> {
        let at = self.current_station();
        if leg.from() != at {
            return Err(DomainError::StationsNotConnected(
                at.clone(),
                leg.from().clone(),
            ));
        }

        Ok(Self {
            origin: self.origin.clone(),
            head: Some(Arc::new(Link {
                leg,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
            tickets: None,
        })
    }

    /// Returns the station the route starts from.
    pub fn origin(&self) -> &StationCode {
        &self.origin
    }

    /// Returns the destination of the final leg, or `None` for a root route.
    pub fn last_station(&self) -> Option<&StationCode> {
        self.head.as_ref().map(|link| link.leg.to())
    }

    /// Returns the station a search continues from.
    pub fn current_station(&self) -> &StationCode {
        self.last_station().unwrap_or(&self.origin)
    }

    /// Returns the last leg, if any.
    pub fn last_leg(&self) -> Option<&Leg> {
        self.head.as_deref().map(|link| link.leg.as_ref())
    }

    /// Number of legs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true for the zero-leg root route.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of changes between trains.
    pub fn connection_count(&self) -> usize {
        self.len.saturating_sub(1)
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> Vec<&Leg> {
        let mut legs: Vec<&Leg> = self.links().map(|link| link.leg.as_ref()).collect();
        legs.reverse();
        legs
    }

    /// Returns the shared leg handles in travel order.
    pub fn shared_legs(&self) -> Vec<Arc<Leg>> {
        let mut legs: Vec<Arc<Leg>> = self.links().map(|link| link.leg.clone()).collect();
        legs.reverse();
        legs
    }

    /// Returns true if the route starts at or passes through `station`.
    pub fn visits(&self, station: &StationCode) -> bool {
        &self.origin == station || self.links().any(|link| link.leg.to() == station)
    }

    /// Departure of the first leg.
    pub fn departure(&self) -> Option<Offset> {
        self.legs().first().map(|leg| leg.departure())
    }

    /// Arrival of the last leg.
    pub fn arrival(&self) -> Option<Offset> {
        self.last_leg().map(Leg::arrival)
    }

    /// Gaps between consecutive legs, in travel order.
    pub fn transfers(&self) -> Vec<Duration> {
        self.legs()
            .windows(2)
            .map(|pair| pair[0].transfer_to(pair[1]))
            .collect()
    }

    /// Total time on board plus all transfer gaps.
    pub fn total_duration(&self) -> Duration {
        let on_board = self
            .links()
            .fold(Duration::zero(), |acc, link| acc + link.leg.duration());
        self.transfers()
            .into_iter()
            .fold(on_board, |acc, gap| acc + gap)
    }

    /// Sum of the individual leg fares.
    pub fn leg_fare_total(&self) -> Fare {
        self.links().map(|link| link.leg.fare()).sum()
    }

    /// Total price: the ticket plan if there is one, otherwise leg fares.
    pub fn total_cost(&self) -> Fare {
        match &self.tickets {
            Some(tickets) => tickets.iter().map(|ticket| ticket.fare).sum(),
            None => self.leg_fare_total(),
        }
    }

    /// Returns the ticket plan, if this route has been priced as one.
    pub fn tickets(&self) -> Option<&[Ticket]> {
        self.tickets.as_deref()
    }

    /// Returns a copy of this route priced with the given ticket plan.
    ///
    /// # Errors
    ///
    /// Returns `Err` unless the tickets cover every leg exactly once, in
    /// order, with matching endpoints.
    pub fn with_tickets(&self, tickets: Vec<Ticket>) -> Result<Self, DomainError> {
        if tickets.is_empty() {
            return Err(DomainError::InvalidTickets("no tickets"));
        }

        let legs = self.legs();
        let mut next = 0;
        for ticket in &tickets {
            if ticket.leg_count == 0 {
                return Err(DomainError::InvalidTickets("ticket covers no legs"));
            }
            if ticket.first_leg != next {
                return Err(DomainError::InvalidTickets("tickets overlap or leave a gap"));
            }
            let last = next + ticket.leg_count - 1;
            let (Some(first_leg), Some(last_leg)) = (legs.get(next), legs.get(last)) else {
                return Err(DomainError::InvalidTickets("ticket runs past the last leg"));
            };
            if first_leg.from() != &ticket.from || last_leg.to() != &ticket.to {
                return Err(DomainError::InvalidTickets("ticket endpoints don't match legs"));
            }
            next = last + 1;
        }
        if next != legs.len() {
            return Err(DomainError::InvalidTickets("tickets don't reach the destination"));
        }

        Ok(Self {
            tickets: Some(tickets.into()),
            ..self.clone()
        })
    }

    /// Rebuilds the route with a predicted delay on every leg.
    ///
    /// `predict` is called once per leg in travel order; the first error
    /// stops the rebuild. Other routes sharing legs with this one are not
    /// affected.
    pub fn try_with_predicted_delays<E, F>(&self, mut predict: F) -> Result<Self, E>
    where
        F: FnMut(&Leg) -> Result<i32, E>,
    {
        let mut head: Option<Arc<Link>> = None;
        for leg in self.legs() {
            let delay = predict(leg)?;
            head = Some(Arc::new(Link {
                leg: Arc::new(leg.with_predicted_delay(delay)),
                prev: head,
            }));
        }

        Ok(Self {
            origin: self.origin.clone(),
            head,
            len: self.len,
            tickets: self.tickets.clone(),
        })
    }

    /// Walks the chain from the newest leg back to the first.
    fn links(&self) -> impl Iterator<Item = &Link> {
        std::iter::successors(self.head.as_deref(), |link| link.prev.as_deref())
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Route", 6)?;
        state.serialize_field("origin", &self.origin)?;
        state.serialize_field("destination", &self.last_station())?;
        state.serialize_field("legs", &self.legs())?;
        state.serialize_field("total_duration_mins", &self.total_duration().num_minutes())?;
        state.serialize_field("total_cost", &self.total_cost())?;
        state.serialize_field("tickets", &self.tickets())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TrainId, TravelClass};

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn leg(train: &str, from: &str, to: &str, dep: i32, arr: i32, fare: u32) -> Leg {
        Leg::new(
            TrainId::parse(train).unwrap(),
            code(from),
            code(to),
            Offset::from_minutes(dep),
            Offset::from_minutes(arr),
            Fare::from_units(fare),
            TravelClass::SecondAc,
        )
        .unwrap()
    }

    fn two_leg_route() -> Route {
        Route::from_legs(vec![
            leg("T1", "A", "B", 0, 60, 100),
            leg("T2", "B", "D", 90, 150, 200),
        ])
        .unwrap()
    }

    #[test]
    fn root_has_no_last_station() {
        let root = Route::root(code("A"));
        assert!(root.is_empty());
        assert_eq!(root.last_station(), None);
        assert_eq!(root.current_station(), &code("A"));
        assert_eq!(root.total_duration(), Duration::zero());
        assert_eq!(root.total_cost(), Fare::zero());
        assert_eq!(root.departure(), None);
    }

    #[test]
    fn empty_legs_rejected() {
        assert!(matches!(
            Route::from_legs(vec![]),
            Err(DomainError::EmptyRoute)
        ));
    }

    #[test]
    fn derived_values() {
        let route = two_leg_route();
        assert_eq!(route.len(), 2);
        assert_eq!(route.connection_count(), 1);
        assert_eq!(route.origin(), &code("A"));
        assert_eq!(route.last_station(), Some(&code("D")));
        assert_eq!(route.transfers(), vec![Duration::minutes(30)]);
        assert_eq!(route.total_duration(), Duration::minutes(150));
        assert_eq!(route.total_cost(), Fare::from_units(300));
        assert_eq!(route.departure(), Some(Offset::from_minutes(0)));
        assert_eq!(route.arrival(), Some(Offset::from_minutes(150)));
    }

    #[test]
    fn legs_in_travel_order() {
        let route = two_leg_route();
        let stations: Vec<&str> = route.legs().iter().map(|l| l.to().as_str()).collect();
        assert_eq!(stations, vec!["B", "D"]);
    }

    #[test]
    fn extend_rejects_disconnected_leg() {
        let route = Route::root(code("A"));
        let result = route.extend(Arc::new(leg("T1", "B", "C", 0, 10, 1)));
        assert!(matches!(result, Err(DomainError::StationsNotConnected(_, _))));
    }

    #[test]
    fn extend_shares_prefix_without_mutation() {
        let base = Route::root(code("A"))
            .extend(Arc::new(leg("T1", "A", "B", 0, 60, 100)))
            .unwrap();
        let left = base
            .extend(Arc::new(leg("T2", "B", "C", 70, 90, 10)))
            .unwrap();
        let right = base
            .extend(Arc::new(leg("T3", "B", "D", 75, 95, 20)))
            .unwrap();

        assert_eq!(base.len(), 1);
        assert_eq!(left.last_station(), Some(&code("C")));
        assert_eq!(right.last_station(), Some(&code("D")));
        assert!(Arc::ptr_eq(&left.shared_legs()[0], &right.shared_legs()[0]));
        assert!(Arc::ptr_eq(&base.shared_legs()[0], &left.shared_legs()[0]));
    }

    #[test]
    fn visits_origin_and_destinations() {
        let route = two_leg_route();
        assert!(route.visits(&code("A")));
        assert!(route.visits(&code("B")));
        assert!(route.visits(&code("D")));
        assert!(!route.visits(&code("C")));
    }

    #[test]
    fn tickets_replace_leg_fares() {
        let route = two_leg_route();
        let priced = route
            .with_tickets(vec![Ticket {
                first_leg: 0,
                leg_count: 2,
                from: code("A"),
                to: code("D"),
                fare: Fare::from_units(250),
            }])
            .unwrap();
        assert_eq!(priced.total_cost(), Fare::from_units(250));
        assert_eq!(priced.leg_fare_total(), Fare::from_units(300));
        assert_eq!(route.total_cost(), Fare::from_units(300));
    }

    #[test]
    fn tickets_must_cover_route() {
        let route = two_leg_route();
        let partial = vec![Ticket {
            first_leg: 0,
            leg_count: 1,
            from: code("A"),
            to: code("B"),
            fare: Fare::from_units(1),
        }];
        assert!(route.with_tickets(partial).is_err());

        let wrong_end = vec![Ticket {
            first_leg: 0,
            leg_count: 2,
            from: code("A"),
            to: code("B"),
            fare: Fare::from_units(1),
        }];
        assert!(route.with_tickets(wrong_end).is_err());

        let overrun = vec![Ticket {
            first_leg: 0,
            leg_count: 3,
            from: code("A"),
            to: code("D"),
            fare: Fare::from_units(1),
        }];
        assert!(route.with_tickets(overrun).is_err());
        assert!(route.with_tickets(vec![]).is_err());
    }

    #[test]
    fn predicted_delays_do_not_leak_to_siblings() {
        let base = Route::root(code("A"))
            .extend(Arc::new(leg("T1", "A", "B", 0, 60, 100)))
            .unwrap();
        let sibling = base
            .extend(Arc::new(leg("T2", "B", "C", 70, 90, 10)))
            .unwrap();

        let annotated = base
            .try_with_predicted_delays(|_| Ok::<_, ()>(7))
            .unwrap();

        assert_eq!(annotated.legs()[0].predicted_delay(), Some(7));
        assert_eq!(base.legs()[0].predicted_delay(), None);
        assert_eq!(sibling.legs()[0].predicted_delay(), None);
    }

    #[test]
    fn predicted_delays_stop_on_error() {
        let route = two_leg_route();
        let mut calls = 0;
        let result = route.try_with_predicted_delays(|_| {
            calls += 1;
            Err::<i32, &str>("stop")
        });
        assert_eq!(result.unwrap_err(), "stop");
        assert_eq!(calls, 1);
    }

    #[test]
    fn serializes_summary() {
        let json = serde_json::to_value(two_leg_route()).unwrap();
        assert_eq!(json["origin"], "A");
        assert_eq!(json["destination"], "D");
        assert_eq!(json["total_duration_mins"], 150);
        assert_eq!(json["legs"].as_array().unwrap().len(), 2);
        assert!(json["tickets"].is_null());
    }
}
