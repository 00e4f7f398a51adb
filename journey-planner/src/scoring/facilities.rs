//! Station facility scoring.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::{NEUTRAL_SCORE, ProviderError, StationComfort};
use crate::domain::StationCode;

const AC_LOUNGE_WEIGHT: f64 = 0.3;
const PLATFORM_QUALITY_WEIGHT: f64 = 0.2;
const FOOD_OPTIONS_WEIGHT: f64 = 0.15;
const WASHROOM_QUALITY_WEIGHT: f64 = 0.15;
const ACCESSIBILITY_WEIGHT: f64 = 0.1;
const SECURITY_WEIGHT: f64 = 0.1;

/// Surveyed facilities at one station. Qualities are in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationFacilities {
    pub has_ac_lounge: bool,
    pub ac_lounge_quality: f64,
    pub platform_quality: f64,
    pub food_options_quality: f64,
    pub washroom_quality: f64,
    pub accessibility_score: f64,
    pub security_score: f64,
}

impl StationFacilities {
    /// Weighted comfort score, capped at 1.0.
    ///
    /// A lounge counts twice: once for existing and once for its quality.
    pub fn comfort_score(&self) -> f64 {
        let lounge = if self.has_ac_lounge { 1.0 } else { 0.0 };
        let score = AC_LOUNGE_WEIGHT * lounge
            + AC_LOUNGE_WEIGHT * self.ac_lounge_quality
            + PLATFORM_QUALITY_WEIGHT * self.platform_quality
            + FOOD_OPTIONS_WEIGHT * self.food_options_quality
            + WASHROOM_QUALITY_WEIGHT * self.washroom_quality
            + ACCESSIBILITY_WEIGHT * self.accessibility_score
            + SECURITY_WEIGHT * self.security_score;
        score.min(1.0)
    }
}

/// In-memory station comfort provider.
#[derive(Debug, Default)]
pub struct FacilityTable {
    stations: RwLock<HashMap<StationCode, StationFacilities>>,
}

impl FacilityTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object mapping station codes to facilities.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let stations: HashMap<StationCode, StationFacilities> = serde_json::from_str(json)?;
        Ok(Self {
            stations: RwLock::new(stations),
        })
    }

    /// Insert or replace the facilities for a station.
    pub fn upsert(&self, station: StationCode, facilities: StationFacilities) -> Result<(), ProviderError> {
        let mut guard = self.stations.write().map_err(|_| poisoned())?;
        guard.insert(station, facilities);
        Ok(())
    }

    /// Number of surveyed stations.
    pub fn len(&self) -> usize {
        self.stations.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns true if no station has been surveyed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StationComfort for FacilityTable {
    fn comfort_score(&self, station: &StationCode) -> Result<f64, ProviderError> {
        let guard = self.stations.read().map_err(|_| poisoned())?;
        Ok(guard
            .get(station)
            .map(StationFacilities::comfort_score)
            .unwrap_or(NEUTRAL_SCORE))
    }
}

fn poisoned() -> ProviderError {
    ProviderError::Unavailable("facility table lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn unknown_station_is_neutral() {
        let table = FacilityTable::new();
        assert_eq!(table.comfort_score(&code("XYZ")).unwrap(), 0.5);
    }

    #[test]
    fn weighted_score() {
        let facilities = StationFacilities {
            has_ac_lounge: false,
            ac_lounge_quality: 0.0,
            platform_quality: 1.0,
            food_options_quality: 1.0,
            washroom_quality: 0.0,
            accessibility_score: 0.5,
            security_score: 0.0,
        };
        // 0.2 + 0.15 + 0.05
        assert!(approx(facilities.comfort_score(), 0.4));
    }

    #[test]
    fn score_is_capped() {
        let facilities = StationFacilities {
            has_ac_lounge: true,
            ac_lounge_quality: 1.0,
            platform_quality: 1.0,
            food_options_quality: 1.0,
            washroom_quality: 1.0,
            accessibility_score: 1.0,
            security_score: 1.0,
        };
        assert_eq!(facilities.comfort_score(), 1.0);
    }

    #[test]
    fn upsert_then_lookup() {
        let table = FacilityTable::new();
        let facilities = StationFacilities {
            platform_quality: 1.0,
            ..StationFacilities::default()
        };
        table.upsert(code("NDLS"), facilities).unwrap();

        assert_eq!(table.len(), 1);
        assert!(approx(table.comfort_score(&code("NDLS")).unwrap(), 0.2));
    }

    #[test]
    fn loads_json() {
        let table = FacilityTable::from_json_str(
            r#"{ "BCT": { "has_ac_lounge": true, "ac_lounge_quality": 0.5 } }"#,
        )
        .unwrap();
        assert!(approx(table.comfort_score(&code("BCT")).unwrap(), 0.45));
        assert!(!table.is_empty());
    }
}
