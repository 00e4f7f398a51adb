//! Train journey planner.
//!
//! A library that answers: "how do I get from this station to that one?"
//! It enumerates multi-leg itineraries over a leg catalog, ranks them by
//! duration, cost or comfort, and filters them against the traveller's
//! transfer, class and luggage preferences.

pub mod cache;
pub mod catalog;
pub mod domain;
pub mod planner;
pub mod scoring;
