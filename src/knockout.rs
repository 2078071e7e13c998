//! Hypothetical knockout paths.
//!
//! Knockout fixtures have venues and kickoffs but no teams until the group
//! stage is played. A [`KnockoutPathTemplate`] lists the match numbers a team
//! would play after finishing in a given position of its group; resolving it
//! against the venue table yields the cities it would fly to.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::{City, GeoPoint, KnockoutVenue, Stage};

/// Knockout venues by stage.
pub type KnockoutVenues = BTreeMap<Stage, Vec<KnockoutVenue>>;

/// Group finishing position a template applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum FinishPosition {
    Winner,
    RunnerUp,
    Third,
}

impl FinishPosition {
    pub const ALL: [FinishPosition; 3] = [
        FinishPosition::Winner,
        FinishPosition::RunnerUp,
        FinishPosition::Third,
    ];

    /// 1, 2 or 3.
    pub fn rank(&self) -> u8 {
        match self {
            FinishPosition::Winner => 1,
            FinishPosition::RunnerUp => 2,
            FinishPosition::Third => 3,
        }
    }
}

impl TryFrom<u8> for FinishPosition {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FinishPosition::Winner),
            2 => Ok(FinishPosition::RunnerUp),
            3 => Ok(FinishPosition::Third),
            other => Err(format!("finishing position must be 1, 2 or 3, got {}", other)),
        }
    }
}

impl From<FinishPosition> for u8 {
    fn from(position: FinishPosition) -> Self {
        position.rank()
    }
}

/// Hand-authored knockout route for one (group, finishing position) pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct KnockoutPathTemplate {
    pub group_id: String,
    pub position: FinishPosition,
    /// Knockout match numbers in playing order
    pub path: Vec<u32>,
}

/// One resolved knockout fixture on a template path.
#[derive(Debug, Clone, PartialEq)]
pub struct KnockoutStop<'a> {
    pub venue: &'a KnockoutVenue,
    pub city: &'a City,
    pub coords: GeoPoint,
}

/// Template for `group_id` finishing in `position`, if one was authored.
pub fn find_template<'a>(
    templates: &'a [KnockoutPathTemplate],
    group_id: &str,
    position: FinishPosition,
) -> Option<&'a KnockoutPathTemplate> {
    templates
        .iter()
        .find(|t| t.group_id == group_id && t.position == position)
}

/// Resolve a template's match numbers to venues and cities, in path order.
///
/// Match numbers with no venue, and venues whose city is unknown, are skipped.
///
/// # Example
///
/// ```rust
/// use worldcup_travel::{
///     resolve_knockout_path, City, FinishPosition, KnockoutPathTemplate, KnockoutVenue,
///     KnockoutVenues, Stage,
/// };
///
/// let cities = vec![City::new("ny", "New York/New Jersey", 40.8135, -74.0745)];
/// let mut venues = KnockoutVenues::new();
/// venues.insert(Stage::Final, vec![KnockoutVenue::new(104, Stage::Final, "ny", "2026-07-19T15:00:00-04:00")]);
///
/// let template = KnockoutPathTemplate {
///     group_id: "A".to_string(),
///     position: FinishPosition::Winner,
///     path: vec![999, 104],
/// };
/// let stops = resolve_knockout_path(&template, &venues, &cities);
/// assert_eq!(stops.len(), 1);
/// assert_eq!(stops[0].city.name, "New York/New Jersey");
/// ```
pub fn resolve_knockout_path<'a>(
    template: &KnockoutPathTemplate,
    venues: &'a KnockoutVenues,
    cities: &'a [City],
) -> Vec<KnockoutStop<'a>> {
    let venue_map: HashMap<u32, &KnockoutVenue> = venues
        .values()
        .flatten()
        .map(|v| (v.match_id, v))
        .collect();
    let city_map: HashMap<&str, &City> = cities.iter().map(|c| (c.id.as_str(), c)).collect();

    template
        .path
        .iter()
        .filter_map(|match_id| {
            let Some(&venue) = venue_map.get(match_id) else {
                debug!(
                    "[Knockout] Group {} position {}: no venue for match {}",
                    template.group_id,
                    template.position.rank(),
                    match_id
                );
                return None;
            };
            let Some(&city) = city_map.get(venue.city_id.as_str()) else {
                debug!("[Knockout] Match {} references unknown city {:?}", match_id, venue.city_id);
                return None;
            };
            Some(KnockoutStop {
                venue,
                city,
                coords: city.coords(),
            })
        })
        .collect()
}
