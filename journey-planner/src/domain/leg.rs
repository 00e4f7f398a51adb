//! Train leg type.
//!
//! A `Leg` is one scheduled single-train segment between two stations, as
//! supplied by the leg catalog. Routes hold legs behind `Arc` so sibling
//! search branches share them without copying.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{DomainError, Fare, Offset, StationCode, TrainId, TravelClass};

/// A leg of a journey (one train between two stations).
///
/// # Invariants
///
/// - `arrival >= departure`
/// - `from != to`
///
/// All fields except the predicted delay are fixed at construction. The
/// delay is only ever set by building a new leg with
/// [`Leg::with_predicted_delay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LegRecord")]
pub struct Leg {
    train_id: TrainId,
    train_name: String,
    from: StationCode,
    to: StationCode,
    departure: Offset,
    arrival: Offset,
    platform: Option<String>,
    fare: Fare,
    class: TravelClass,
    predicted_delay: Option<i32>,
}

/// Unvalidated wire form of a leg.
#[derive(Deserialize)]
struct LegRecord {
    train_id: TrainId,
    #[serde(default)]
    train_name: String,
    from: StationCode,
    to: StationCode,
    departure: Offset,
    arrival: Offset,
    #[serde(default)]
    platform: Option<String>,
    fare: Fare,
    class: TravelClass,
    #[serde(default)]
    predicted_delay: Option<i32>,
}

impl TryFrom<LegRecord> for Leg {
    type Error = DomainError;

    fn try_from(record: LegRecord) -> Result<Self, Self::Error> {
        let mut leg = Leg::new(
            record.train_id,
            record.from,
            record.to,
            record.departure,
            record.arrival,
            record.fare,
            record.class,
        )?;
        leg.train_name = record.train_name;
        leg.platform = record.platform;
        leg.predicted_delay = record.predicted_delay;
        Ok(leg)
    }
}

impl Leg {
    /// Construct a leg, validating its timing and endpoints.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `arrival` is before `departure`
    /// - `from` and `to` are the same station
    ///
    /// # Examples
    ///
    /// ```
    /// use journey_planner::domain::{Fare, Leg, Offset, StationCode, TrainId, TravelClass};
    ///
    /// let leg = Leg::new(
    ///     TrainId::parse("12951").unwrap(),
    ///     StationCode::parse("BCT").unwrap(),
    ///     StationCode::parse("NDLS").unwrap(),
    ///     Offset::parse_hhmm("17:00", 0).unwrap(),
    ///     Offset::parse_hhmm("08:32", 1).unwrap(),
    ///     Fare::from_units(3065),
    ///     TravelClass::SecondAc,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(leg.duration().num_minutes(), 932);
    /// assert_eq!(leg.predicted_delay(), None);
    /// ```
    pub fn new(
        train_id: TrainId,
        from: StationCode,
        to: StationCode,
        departure: Offset,
        arrival: Offset,
        fare: Fare,
        class: TravelClass,
    ) -> Result<Self, DomainError> {
        if arrival < departure {
            return Err(DomainError::InvalidLeg(
                "arrival must not precede departure",
            ));
        }
        if from == to {
            return Err(DomainError::InvalidLeg(
                "origin and destination must differ",
            ));
        }

        Ok(Leg {
            train_id,
            train_name: String::new(),
            from,
            to,
            departure,
            arrival,
            platform: None,
            fare,
            class,
            predicted_delay: None,
        })
    }

    /// Sets the display name of the train.
    pub fn with_train_name(mut self, name: impl Into<String>) -> Self {
        self.train_name = name.into();
        self
    }

    /// Sets the departure platform.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Returns a copy of this leg carrying a predicted delay.
    pub fn with_predicted_delay(&self, minutes: i32) -> Self {
        Leg {
            predicted_delay: Some(minutes),
            ..self.clone()
        }
    }

    /// Returns the train identifier.
    pub fn train_id(&self) -> &TrainId {
        &self.train_id
    }

    /// Returns the train display name (may be empty).
    pub fn train_name(&self) -> &str {
        &self.train_name
    }

    /// Returns the boarding station.
    pub fn from(&self) -> &StationCode {
        &self.from
    }

    /// Returns the alighting station.
    pub fn to(&self) -> &StationCode {
        &self.to
    }

    /// Returns the scheduled departure.
    pub fn departure(&self) -> Offset {
        self.departure
    }

    /// Returns the scheduled arrival.
    pub fn arrival(&self) -> Offset {
        self.arrival
    }

    /// Returns the departure platform, if known.
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Returns the fare for this leg bought on its own.
    pub fn fare(&self) -> Fare {
        self.fare
    }

    /// Returns the travel class.
    pub fn class(&self) -> &TravelClass {
        &self.class
    }

    /// Returns the predicted delay in minutes, once annotated.
    pub fn predicted_delay(&self) -> Option<i32> {
        self.predicted_delay
    }

    /// Time on board.
    pub fn duration(&self) -> Duration {
        self.arrival.signed_duration_since(self.departure)
    }

    /// Gap between arriving on this leg and departing on `next`.
    ///
    /// Negative when `next` departs before this leg arrives.
    pub fn transfer_to(&self, next: &Leg) -> Duration {
        next.departure.signed_duration_since(self.arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn make_leg(from: &str, to: &str, dep: i32, arr: i32) -> Result<Leg, DomainError> {
        Leg::new(
            TrainId::parse("T1").unwrap(),
            code(from),
            code(to),
            Offset::from_minutes(dep),
            Offset::from_minutes(arr),
            Fare::from_units(100),
            TravelClass::ThirdAc,
        )
    }

    #[test]
    fn valid_leg() {
        let leg = make_leg("A", "B", 0, 60).unwrap();
        assert_eq!(leg.duration(), Duration::minutes(60));
        assert_eq!(leg.from(), &code("A"));
        assert_eq!(leg.to(), &code("B"));
        assert_eq!(leg.platform(), None);
        assert_eq!(leg.train_name(), "");
    }

    #[test]
    fn zero_length_leg_allowed() {
        assert!(make_leg("A", "B", 30, 30).is_ok());
    }

    #[test]
    fn reject_arrival_before_departure() {
        assert!(matches!(
            make_leg("A", "B", 60, 0),
            Err(DomainError::InvalidLeg(_))
        ));
    }

    #[test]
    fn reject_same_station() {
        assert!(matches!(
            make_leg("A", "A", 0, 10),
            Err(DomainError::InvalidLeg(_))
        ));
    }

    #[test]
    fn transfer_between_legs() {
        let first = make_leg("A", "B", 0, 60).unwrap();
        let second = make_leg("B", "D", 90, 150).unwrap();
        assert_eq!(first.transfer_to(&second), Duration::minutes(30));
        assert_eq!(second.transfer_to(&first), Duration::minutes(-150));
    }

    #[test]
    fn predicted_delay_builds_new_leg() {
        let leg = make_leg("A", "B", 0, 60).unwrap();
        let delayed = leg.with_predicted_delay(12);
        assert_eq!(leg.predicted_delay(), None);
        assert_eq!(delayed.predicted_delay(), Some(12));
        assert_eq!(delayed.departure(), leg.departure());
    }

    #[test]
    fn builders_set_optional_fields() {
        let leg = make_leg("A", "B", 0, 60)
            .unwrap()
            .with_train_name("Rajdhani Express")
            .with_platform("5");
        assert_eq!(leg.train_name(), "Rajdhani Express");
        assert_eq!(leg.platform(), Some("5"));
    }

    #[test]
    fn deserialize_validates() {
        let good = r#"{
            "train_id": "12951", "train_name": "Rajdhani",
            "from": "BCT", "to": "NDLS",
            "departure": 1020, "arrival": 1952,
            "platform": "3", "fare": 3065, "class": "2A"
        }"#;
        let leg: Leg = serde_json::from_str(good).unwrap();
        assert_eq!(leg.class(), &TravelClass::SecondAc);
        assert_eq!(leg.platform(), Some("3"));

        let bad = r#"{
            "train_id": "12951", "from": "BCT", "to": "NDLS",
            "departure": 1952, "arrival": 1020, "fare": 3065, "class": "2A"
        }"#;
        assert!(serde_json::from_str::<Leg>(bad).is_err());
    }
}
