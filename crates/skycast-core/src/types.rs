//! Core data types for weather lookups

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Candidate positions returned for a place name, best match first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeocodeResult {
    pub candidates: Vec<Coordinate>,
}

impl GeocodeResult {
    pub fn new(candidates: Vec<Coordinate>) -> Self {
        Self { candidates }
    }

    /// The first candidate. Later candidates are never consulted.
    pub fn best_match(&self) -> Option<&Coordinate> {
        self.candidates.first()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Single point-in-time reading for a coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherObservation {
    /// Degrees Celsius
    pub temperature: f64,
    /// km/h
    pub windspeed: f64,
    /// WMO weather interpretation code
    pub condition_code: i16,
}

/// Weather answer returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// The city exactly as the caller supplied it
    pub city: String,
    pub temperature: f64,
    pub windspeed: f64,
    pub description: String,
}

/// One row of the search history log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub city: String,
    #[serde(rename = "search_time")]
    pub searched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn best_match_is_first_candidate() {
        let result = GeocodeResult::new(vec![
            Coordinate::new(51.5, -0.12),
            Coordinate::new(42.98, -81.24),
        ]);
        assert_eq!(result.best_match(), Some(&Coordinate::new(51.5, -0.12)));
    }

    #[test]
    fn empty_result_has_no_best_match() {
        let result = GeocodeResult::default();
        assert!(result.is_empty());
        assert!(result.best_match().is_none());
    }

    #[test]
    fn weather_report_shape() {
        let report = WeatherReport {
            city: "London".into(),
            temperature: 15.0,
            windspeed: 10.0,
            description: "Clear Sky".into(),
        };
        let json = serde_json::to_string(&report).unwrap();
        insta::assert_snapshot!(json, @r#"{"city":"London","temperature":15.0,"windspeed":10.0,"description":"Clear Sky"}"#);
    }

    #[test]
    fn history_entry_uses_search_time_key() {
        let entry = HistoryEntry {
            id: 7,
            city: "Oslo".into(),
            searched_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["city"], "Oslo");
        assert_eq!(value["search_time"], "2024-03-01T12:00:00Z");
        assert!(value.get("searched_at").is_none());
    }
}
