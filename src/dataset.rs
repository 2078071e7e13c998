//! Parse-and-validate boundary for the static JSON fixtures.
//!
//! Everything downstream of [`Dataset`] assumes references resolve and
//! datetimes parse. This module is where that gets checked, once, at load.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::DateTime;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::itinerary::{build_itinerary, TeamItinerary};
use crate::knockout::{KnockoutPathTemplate, KnockoutVenues};
use crate::{City, Match, Stage, Team};

/// Number of groups in the 48-team format.
pub const GROUP_COUNT: usize = 12;

/// Round-robin matches per group of four.
pub const MATCHES_PER_GROUP: usize = 6;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("city {0} has invalid coordinates")]
    InvalidCoordinates(String),
    #[error("match {match_id} references unknown city {city_id:?}")]
    UnknownCity { match_id: u32, city_id: String },
    #[error("match {match_id} references unknown team {team:?}")]
    UnknownTeam { match_id: u32, team: String },
    #[error("match {match_id} is in group {group:?} but {team} plays in group {team_group:?}")]
    GroupMismatch {
        match_id: u32,
        group: String,
        team: String,
        team_group: String,
    },
    #[error("match {match_id} has malformed datetime {datetime:?}")]
    MalformedDatetime { match_id: u32, datetime: String },
    #[error("expected {expected} group-stage matches, found {found}")]
    GroupStageCount { expected: usize, found: usize },
    #[error("group {group:?} has {found} matches, expected {expected}")]
    GroupSize {
        group: String,
        found: usize,
        expected: usize,
    },
}

/// All reference data behind the map, validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub cities: Vec<City>,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub knockout_venues: KnockoutVenues,
    pub knockout_paths: Vec<KnockoutPathTemplate>,
}

fn parse<T: serde::de::DeserializeOwned>(what: &'static str, json: &str) -> Result<T, DatasetError> {
    serde_json::from_str(json).map_err(|source| DatasetError::Parse { what, source })
}

impl Dataset {
    /// Parse each fixture file's contents and validate the result.
    pub fn from_json(
        cities: &str,
        teams: &str,
        matches: &str,
        knockout_venues: &str,
        knockout_paths: &str,
    ) -> Result<Self, DatasetError> {
        let dataset = Self {
            cities: parse("cities", cities)?,
            teams: parse("teams", teams)?,
            matches: parse("matches", matches)?,
            knockout_venues: parse("knockout venues", knockout_venues)?,
            knockout_paths: parse("knockout paths", knockout_paths)?,
        };
        dataset.validate()?;

        info!(
            "[Dataset] Loaded {} cities, {} teams, {} matches, {} knockout paths",
            dataset.cities.len(),
            dataset.teams.len(),
            dataset.matches.len(),
            dataset.knockout_paths.len()
        );
        Ok(dataset)
    }

    /// Check ids, references, datetimes and group-stage shape. Returns the
    /// first problem found.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut city_ids = HashSet::new();
        for city in &self.cities {
            if !city_ids.insert(city.id.as_str()) {
                return Err(DatasetError::DuplicateId { kind: "city", id: city.id.clone() });
            }
            if !city.coords().is_valid() {
                return Err(DatasetError::InvalidCoordinates(city.id.clone()));
            }
        }

        let mut team_groups: HashMap<&str, &str> = HashMap::new();
        for team in &self.teams {
            if team_groups.insert(team.code.as_str(), team.group.as_str()).is_some() {
                return Err(DatasetError::DuplicateId { kind: "team", id: team.code.clone() });
            }
        }

        let mut match_ids = HashSet::new();
        let mut group_sizes: BTreeMap<&str, usize> = BTreeMap::new();
        for m in &self.matches {
            if !match_ids.insert(m.id) {
                return Err(DatasetError::DuplicateId { kind: "match", id: m.id.to_string() });
            }
            if !city_ids.contains(m.city_id.as_str()) {
                return Err(DatasetError::UnknownCity { match_id: m.id, city_id: m.city_id.clone() });
            }
            if m.kickoff().is_none() {
                return Err(DatasetError::MalformedDatetime { match_id: m.id, datetime: m.datetime.clone() });
            }
            if m.stage != Stage::Group {
                continue;
            }

            for team in [&m.team1, &m.team2] {
                let Some(&team_group) = team_groups.get(team.as_str()) else {
                    return Err(DatasetError::UnknownTeam { match_id: m.id, team: team.clone() });
                };
                if team_group != m.group {
                    return Err(DatasetError::GroupMismatch {
                        match_id: m.id,
                        group: m.group.clone(),
                        team: team.clone(),
                        team_group: team_group.to_string(),
                    });
                }
            }
            *group_sizes.entry(m.group.as_str()).or_insert(0) += 1;
        }

        let expected = GROUP_COUNT * MATCHES_PER_GROUP;
        let found: usize = group_sizes.values().sum();
        if found != expected {
            return Err(DatasetError::GroupStageCount { expected, found });
        }
        if let Some((group, &size)) = group_sizes.iter().find(|(_, n)| **n != MATCHES_PER_GROUP) {
            return Err(DatasetError::GroupSize {
                group: group.to_string(),
                found: size,
                expected: MATCHES_PER_GROUP,
            });
        }

        for venue in self.knockout_venues.values().flatten() {
            if !city_ids.contains(venue.city_id.as_str()) {
                return Err(DatasetError::UnknownCity { match_id: venue.match_id, city_id: venue.city_id.clone() });
            }
            if DateTime::parse_from_rfc3339(&venue.datetime).is_err() {
                return Err(DatasetError::MalformedDatetime {
                    match_id: venue.match_id,
                    datetime: venue.datetime.clone(),
                });
            }
        }

        debug!("[Dataset] Validated {} groups", group_sizes.len());
        Ok(())
    }

    /// Itinerary for `team_code` over all matches.
    pub fn itinerary(&self, team_code: &str) -> TeamItinerary<'_> {
        build_itinerary(team_code, &self.matches, &self.cities)
    }
}
