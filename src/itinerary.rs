//! # Team Itineraries
//!
//! Joins a team's matches against host-city coordinates and derives the
//! flight segments the map draws between them.
//!
//! ## Segment flags
//!
//! - `is_same_city`: both ends round to the same coordinates (4 decimal places).
//!   Rendered as a loop instead of an arc.
//! - `is_return`: the unordered city pair was already flown earlier in the
//!   schedule, in either direction. Same-city segments are never returns.
//!
//! Matches whose city is missing from the reference data are dropped and
//! logged; nothing here fails.

use std::collections::HashMap;

use log::warn;

use crate::geo_utils::{compute_bounds, haversine_km, path_length_km, Bounds};
use crate::{City, GeoPoint, Match};

/// A match joined with its host city.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchWithCoords<'a> {
    pub fixture: &'a Match,
    pub coords: GeoPoint,
    pub city: &'a City,
}

/// A flight between two consecutive stops of an itinerary.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FlightSegment {
    pub from: GeoPoint,
    pub to: GeoPoint,
    /// Position in the itinerary, starting at 0
    pub segment_index: usize,
    /// Unordered city pair already flown earlier
    pub is_return: bool,
    /// Both ends are the same city
    pub is_same_city: bool,
}

impl FlightSegment {
    /// Great-circle length of the segment in kilometers.
    pub fn distance_km(&self) -> f64 {
        haversine_km(&self.from, &self.to)
    }
}

/// A team's chronological stops and the flights between them.
#[derive(Debug, Clone)]
pub struct TeamItinerary<'a> {
    pub team_code: String,
    pub stops: Vec<MatchWithCoords<'a>>,
    pub segments: Vec<FlightSegment>,
}

impl<'a> TeamItinerary<'a> {
    /// Stop coordinates in order.
    pub fn coords(&self) -> Vec<GeoPoint> {
        self.stops.iter().map(|s| s.coords).collect()
    }

    /// Total great-circle travel in kilometers.
    pub fn total_distance_km(&self) -> f64 {
        path_length_km(&self.coords())
    }

    /// Box around every stop, `None` for a team without stops.
    pub fn bounds(&self) -> Option<Bounds> {
        compute_bounds(&self.coords())
    }

    /// City names in visiting order.
    pub fn city_names(&self) -> Vec<&'a str> {
        self.stops.iter().map(|s| s.city.name.as_str()).collect()
    }
}

/// Build a team's itinerary: its matches in kickoff order, joined with
/// coordinates, plus the derived flight segments.
pub fn build_itinerary<'a>(team_code: &str, matches: &'a [Match], cities: &'a [City]) -> TeamItinerary<'a> {
    let stops = itinerary_stops(team_code, matches, cities);
    let segments = build_segments(&stops);
    TeamItinerary {
        team_code: team_code.to_string(),
        stops,
        segments,
    }
}

/// A team's matches sorted by kickoff and joined with their city.
///
/// The sort is stable, so matches with equal kickoffs keep input order.
/// Unparseable kickoffs sort after all others. Matches whose city is unknown
/// are dropped.
pub fn itinerary_stops<'a>(team_code: &str, matches: &'a [Match], cities: &'a [City]) -> Vec<MatchWithCoords<'a>> {
    let city_map: HashMap<&str, &City> = cities.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut team_matches: Vec<&Match> = matches.iter().filter(|m| m.involves(team_code)).collect();
    team_matches.sort_by_key(|m| {
        let kickoff = m.kickoff();
        (kickoff.is_none(), kickoff)
    });

    team_matches
        .into_iter()
        .filter_map(|m| {
            let Some(&city) = city_map.get(m.city_id.as_str()) else {
                warn!("[Itinerary] Match {} for {} references unknown city {:?}", m.id, team_code, m.city_id);
                return None;
            };
            Some(MatchWithCoords {
                fixture: m,
                coords: city.coords(),
                city,
            })
        })
        .collect()
}

/// Coordinates in units of 1e-4 degrees, rounded half away from zero.
/// The integer cast folds `-0` into `0`.
fn coord_key(p: &GeoPoint) -> (i64, i64) {
    ((p.lat * 1e4).round() as i64, (p.lng * 1e4).round() as i64)
}

/// Flight segments between consecutive stops.
///
/// # Example
///
/// ```rust
/// use worldcup_travel::{build_segments, City, Match, MatchWithCoords, Stage};
///
/// let houston = City::new("hou", "Houston", 29.76, -95.37);
/// let kc = City::new("kc", "Kansas City", 39.10, -94.58);
/// let m = Match::new(1, "E", "GER", "CUW", "hou", "2026-06-14T12:00:00-05:00", Stage::Group);
///
/// let stops = vec![
///     MatchWithCoords { fixture: &m, coords: houston.coords(), city: &houston },
///     MatchWithCoords { fixture: &m, coords: kc.coords(), city: &kc },
///     MatchWithCoords { fixture: &m, coords: houston.coords(), city: &houston },
/// ];
/// let segments = build_segments(&stops);
/// assert!(!segments[0].is_return);
/// assert!(segments[1].is_return);
/// ```
pub fn build_segments(stops: &[MatchWithCoords<'_>]) -> Vec<FlightSegment> {
    let mut pair_counts: HashMap<((i64, i64), (i64, i64)), u32> = HashMap::new();

    stops
        .windows(2)
        .enumerate()
        .map(|(segment_index, w)| {
            let from = w[0].coords;
            let to = w[1].coords;
            let from_key = coord_key(&from);
            let to_key = coord_key(&to);
            let is_same_city = from_key == to_key;

            let pair = if from_key <= to_key { (from_key, to_key) } else { (to_key, from_key) };
            let count = pair_counts.entry(pair).or_insert(0);
            let prior = *count;
            *count += 1;

            FlightSegment {
                from,
                to,
                segment_index,
                is_return: prior > 0 && !is_same_city,
                is_same_city,
            }
        })
        .collect()
}
