//! # World Cup Travel
//!
//! Geometry, great-circle distances and match-day bucketing behind the 2026
//! World Cup host-city map.
//!
//! This library provides:
//! - Haversine distances and itinerary lengths in kilometers
//! - Curved flight paths, chevron-sampled arcs and same-city loops as SVG path data
//! - Match-day bucketing with a late-night cutover in a reference time zone
//! - Team itineraries and flight segments flagged for same-city and repeated legs
//! - Knockout path projections and travel-distance rankings
//!
//! ## Features
//!
//! - **`serde`** - Serialize/Deserialize for all entity types
//! - **`json`** - Parse and validate the static JSON fixtures
//! - **`parallel`** - Compute travel reports with rayon
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use worldcup_travel::{build_itinerary, City, Match, Stage};
//!
//! let cities = vec![
//!     City::new("hou", "Houston", 29.76, -95.37),
//!     City::new("kc", "Kansas City", 39.10, -94.58),
//! ];
//! let matches = vec![
//!     Match::new(1, "A", "MEX", "RSA", "hou", "2026-06-14T12:00:00-05:00", Stage::Group),
//!     Match::new(2, "A", "MEX", "KOR", "kc", "2026-06-20T20:00:00-05:00", Stage::Group),
//! ];
//!
//! let itinerary = build_itinerary("MEX", &matches, &cities);
//! assert_eq!(itinerary.stops.len(), 2);
//! assert_eq!(itinerary.segments.len(), 1);
//! println!("MEX travels {:.0} km", itinerary.total_distance_km());
//! ```

use chrono::{DateTime, FixedOffset};

pub mod geo_utils;
pub use geo_utils::{haversine_km, path_length_km, Bounds};

pub mod path_geometry;
pub use path_geometry::{
    arc_path, chevron_path, loop_chevron_path, loop_path, PathConfig, PathSpec, Point2D,
};

pub mod match_day;
pub use match_day::{group_by_match_day, match_day, tournament_day_number, MatchDayConfig};

pub mod itinerary;
pub use itinerary::{
    build_itinerary, build_segments, itinerary_stops, FlightSegment, MatchWithCoords, TeamItinerary,
};

pub mod knockout;
pub use knockout::{
    find_template, resolve_knockout_path, FinishPosition, KnockoutPathTemplate, KnockoutStop,
    KnockoutVenues,
};

pub mod report;
pub use report::{group_stage_travel, knockout_travel, render_markdown_table, TravelSummary};

// Parse-and-validate boundary for the JSON fixtures
#[cfg(feature = "json")]
pub mod dataset;

#[cfg(feature = "json")]
pub use dataset::{Dataset, DatasetError};

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate in degrees.
///
/// # Example
/// ```
/// use worldcup_travel::GeoPoint;
/// let toronto = GeoPoint::new(43.6332, -79.4186);
/// assert!(toronto.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check if the point has finite coordinates within latitude/longitude range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        geo::Point::new(p.lng, p.lat)
    }
}

impl From<[f64; 2]> for GeoPoint {
    /// `[lat, lng]`, the order used by the map layer.
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

/// Tournament stage of a fixture.
///
/// Variants are ordered by tournament progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stage {
    Group,
    #[cfg_attr(feature = "serde", serde(rename = "round_of_32"))]
    RoundOf32,
    #[cfg_attr(feature = "serde", serde(rename = "round_of_16"))]
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    ThirdPlace,
    Final,
}

impl Stage {
    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Group => "Group stage",
            Stage::RoundOf32 => "Round of 32",
            Stage::RoundOf16 => "Round of 16",
            Stage::QuarterFinal => "Quarter-final",
            Stage::SemiFinal => "Semi-final",
            Stage::ThirdPlace => "Third place",
            Stage::Final => "Final",
        }
    }
}

/// A host city and its stadium.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct City {
    /// Unique identifier referenced by matches and knockout venues
    pub id: String,
    pub name: String,
    pub country: String,
    pub country_code: String,
    pub lat: f64,
    pub lng: f64,
    pub venue: String,
    pub capacity: u32,
}

impl City {
    /// Create a city with only the fields needed for geometry; the rest are empty.
    pub fn new(id: &str, name: &str, lat: f64, lng: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            country: String::new(),
            country_code: String::new(),
            lat,
            lng,
            venue: String::new(),
            capacity: 0,
        }
    }

    /// Stadium coordinates.
    pub fn coords(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// A qualified team.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    /// Unique three-letter code
    pub code: String,
    pub name: String,
    /// Group letter ("A" to "L")
    pub group: String,
    pub flag: String,
}

impl Team {
    pub fn new(code: &str, name: &str, group: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            group: group.to_string(),
            flag: String::new(),
        }
    }
}

/// A scheduled fixture.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Match {
    /// FIFA match number
    pub id: u32,
    pub group: String,
    pub team1: String,
    pub team2: String,
    pub city_id: String,
    /// ISO-8601 kickoff with explicit UTC offset
    pub datetime: String,
    pub stage: Stage,
}

impl Match {
    pub fn new(
        id: u32,
        group: &str,
        team1: &str,
        team2: &str,
        city_id: &str,
        datetime: &str,
        stage: Stage,
    ) -> Self {
        Self {
            id,
            group: group.to_string(),
            team1: team1.to_string(),
            team2: team2.to_string(),
            city_id: city_id.to_string(),
            datetime: datetime.to_string(),
            stage,
        }
    }

    /// Parsed kickoff time, `None` if `datetime` is malformed.
    pub fn kickoff(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.datetime).ok()
    }

    /// True if `team_code` plays in this match.
    pub fn involves(&self, team_code: &str) -> bool {
        self.team1 == team_code || self.team2 == team_code
    }
}

/// A knockout fixture whose venue and time are known but whose teams are not.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct KnockoutVenue {
    pub match_id: u32,
    pub stage: Stage,
    pub city_id: String,
    pub datetime: String,
}

impl KnockoutVenue {
    pub fn new(match_id: u32, stage: Stage, city_id: &str, datetime: &str) -> Self {
        Self {
            match_id,
            stage,
            city_id: city_id.to_string(),
            datetime: datetime.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(19.3029, -99.1505).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_geo_point_into_geo_point_is_lng_lat() {
        let p: geo::Point<f64> = GeoPoint::new(40.0, -74.0).into();
        assert_eq!(p.x(), -74.0);
        assert_eq!(p.y(), 40.0);
    }

    #[test]
    fn test_geo_point_from_lat_lng_pair() {
        assert_eq!(GeoPoint::from([29.76, -95.37]), GeoPoint::new(29.76, -95.37));
    }

    #[test]
    fn test_match_kickoff() {
        let m = Match::new(1, "A", "MEX", "RSA", "mex", "2026-06-11T13:00:00-06:00", Stage::Group);
        let kickoff = m.kickoff().unwrap();
        assert_eq!(kickoff.to_rfc3339(), "2026-06-11T13:00:00-06:00");

        let bad = Match { datetime: "not a date".to_string(), ..m };
        assert!(bad.kickoff().is_none());
    }

    #[test]
    fn test_match_involves() {
        let m = Match::new(1, "A", "MEX", "RSA", "mex", "2026-06-11T13:00:00-06:00", Stage::Group);
        assert!(m.involves("MEX"));
        assert!(m.involves("RSA"));
        assert!(!m.involves("KOR"));
    }

    #[test]
    fn test_stage_ordering() {
        assert!(Stage::Group < Stage::RoundOf32);
        assert!(Stage::SemiFinal < Stage::Final);
        assert_eq!(Stage::QuarterFinal.label(), "Quarter-final");
    }
}
