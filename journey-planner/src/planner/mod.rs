//! Journey planner.
//!
//! This module implements the planning pipeline that answers: "how do I get
//! from this station to that one, best first under my chosen objective?"
//!
//! Routes are enumerated by breadth-first search over the leg graph, ranked
//! by duration, cost (including split tickets) or comfort, annotated with
//! predicted delays and finally filtered against the traveller's transfer,
//! class and luggage constraints.

mod annotate;
mod cancel;
mod config;
mod enumerate;
mod filter;
mod optimize;
mod search;
mod service;
mod split;

#[cfg(test)]
mod test_support;

pub use annotate::annotate;
pub use cancel::Cancellation;
pub use config::SearchConfig;
pub use enumerate::{Enumeration, enumerate};
pub use filter::{classes_accepted, filter, luggage_buffer_met, passes, transfers_within_bounds};
pub use optimize::{MAX_RESULTS, by_comfort, by_cost, by_duration, comfort_score, optimize};
pub use search::{Plan, PlanError, PlanRequest, Planner};
pub use service::{JourneyService, PlanHandle};
pub use split::split_variants;
