//! Domain types for the journey planner.
//!
//! This module contains the core domain model types that represent
//! validated schedule data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod class;
mod error;
mod fare;
mod leg;
mod preferences;
mod route;
mod station;
mod time;
mod train;

pub use class::TravelClass;
pub use error::DomainError;
pub use fare::Fare;
pub use leg::Leg;
pub use preferences::{InvalidPreferences, JourneyPreferences, OptimizationMode, UnknownMode};
pub use route::{Route, Ticket};
pub use station::{InvalidStationCode, StationCode};
pub use time::{Offset, TimeError};
pub use train::{InvalidTrainId, TrainId};
