//! Split-ticket pricing.
//!
//! A route can sometimes be bought more cheaply as several tickets, each
//! covering a contiguous run of legs, than at its plain per-leg price.
//! [`split_variants`] always returns the route as priced, followed by the
//! cheapest ticket plan when that plan is strictly cheaper.

use tracing::{debug, trace};

use crate::catalog::FareQuotes;
use crate::domain::{Fare, Leg, Route, Ticket};

/// Pricing variants of `route`: the route itself, then possibly a cheaper
/// split-ticket plan over the same legs.
pub fn split_variants<Q: FareQuotes + ?Sized>(route: &Route, quotes: &Q) -> Vec<Route> {
    let mut variants = vec![route.clone()];

    let Some(tickets) = cheapest_tickets(route, quotes) else {
        return variants;
    };
    let plan_cost: Fare = tickets.iter().map(|ticket| ticket.fare).sum();
    if plan_cost >= route.total_cost() {
        return variants;
    }

    match route.with_tickets(tickets) {
        Ok(split) => {
            trace!(
                origin = %route.origin(),
                legs = route.len(),
                tickets = split.tickets().map_or(0, <[Ticket]>::len),
                saving = %(route.total_cost().amount() - plan_cost.amount()),
                "Found cheaper ticket plan"
            );
            variants.push(split);
        }
        Err(e) => debug!(error = %e, "Discarding malformed ticket plan"),
    }
    variants
}

/// Cheapest partition of the route's legs into contiguous tickets.
///
/// `best[j]` is the cheapest way to buy the first `j` legs; each step tries
/// every ticket that could end at leg `j`. Ties keep the plan with the
/// longer final ticket. Returns `None` for an empty route.
fn cheapest_tickets<Q: FareQuotes + ?Sized>(route: &Route, quotes: &Q) -> Option<Vec<Ticket>> {
    let legs = route.legs();
    let n = legs.len();
    if n == 0 {
        return None;
    }

    // (cost of first j legs, start of the ticket ending at j)
    let mut best: Vec<Option<(Fare, usize)>> = vec![None; n + 1];
    best[0] = Some((Fare::zero(), 0));

    for end in 1..=n {
        for start in 0..end {
            let Some((prefix, _)) = best[start] else {
                continue;
            };
            let cost = prefix + segment_price(&legs[start..end], quotes);
            if best[end].is_none_or(|(current, _)| cost < current) {
                best[end] = Some((cost, start));
            }
        }
    }

    let mut tickets = Vec::new();
    let mut end = n;
    while end > 0 {
        let (_, start) = best[end]?;
        let covered = &legs[start..end];
        tickets.push(Ticket {
            first_leg: start,
            leg_count: end - start,
            from: covered.first()?.from().clone(),
            to: covered.last()?.to().clone(),
            fare: segment_price(covered, quotes),
        });
        end = start;
    }
    tickets.reverse();
    Some(tickets)
}

/// Price of one ticket over `legs`: a quoted fare, else the leg fares.
///
/// A single leg is always bought at its own fare; only tickets spanning
/// two or more legs are quoted.
fn segment_price<Q: FareQuotes + ?Sized>(legs: &[&Leg], quotes: &Q) -> Fare {
    let leg_fares = || -> Fare { legs.iter().map(|leg| leg.fare()).sum() };
    if legs.len() < 2 {
        return leg_fares();
    }
    quotes.segment_fare(legs).unwrap_or_else(leg_fares)
}
