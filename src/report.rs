//! Travel-distance rankings.
//!
//! Totals great-circle travel per team for the group stage, and for each
//! hypothetical knockout path (group stage followed by the authored
//! knockout route), then renders a ranked markdown table.

use log::info;

use crate::geo_utils::path_length_km;
use crate::itinerary::itinerary_stops;
use crate::knockout::{find_template, resolve_knockout_path, FinishPosition, KnockoutPathTemplate, KnockoutVenues};
use crate::{City, GeoPoint, Match, Stage, Team};

/// One ranked row: a team or a team's hypothetical path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelSummary {
    pub label: String,
    pub total_km: f64,
    /// City names in travel order
    pub route: Vec<String>,
}

impl TravelSummary {
    fn from_stops(label: String, stops: &[(GeoPoint, &str)]) -> Self {
        let coords: Vec<GeoPoint> = stops.iter().map(|(p, _)| *p).collect();
        Self {
            label,
            total_km: path_length_km(&coords),
            route: stops.iter().map(|(_, name)| name.to_string()).collect(),
        }
    }
}

/// Longest travel first; ties by label.
fn rank(rows: &mut [TravelSummary]) {
    rows.sort_by(|a, b| b.total_km.total_cmp(&a.total_km).then_with(|| a.label.cmp(&b.label)));
}

fn group_stage_matches(matches: &[Match]) -> Vec<Match> {
    matches.iter().filter(|m| m.stage == Stage::Group).cloned().collect()
}

fn group_stage_stops<'a>(team: &Team, group_matches: &'a [Match], cities: &'a [City]) -> Vec<(GeoPoint, &'a str)> {
    itinerary_stops(&team.code, group_matches, cities)
        .into_iter()
        .map(|s| (s.coords, s.city.name.as_str()))
        .collect()
}

/// Group-stage travel per team, longest first.
///
/// # Example
///
/// ```rust
/// use worldcup_travel::{group_stage_travel, City, Match, Stage, Team};
///
/// let cities = vec![
///     City::new("tor", "Toronto", 43.6332, -79.4186),
///     City::new("van", "Vancouver", 49.2768, -123.1120),
/// ];
/// let teams = vec![Team::new("CAN", "Canada", "B"), Team::new("QAT", "Qatar", "B")];
/// let matches = vec![
///     Match::new(3, "B", "CAN", "QAT", "tor", "2026-06-12T15:00:00-04:00", Stage::Group),
///     Match::new(27, "B", "CAN", "SUI", "van", "2026-06-18T15:00:00-07:00", Stage::Group),
/// ];
///
/// let ranking = group_stage_travel(&teams, &matches, &cities);
/// assert_eq!(ranking[0].label, "CAN");
/// assert_eq!(ranking[1].total_km, 0.0);
/// ```
pub fn group_stage_travel(teams: &[Team], matches: &[Match], cities: &[City]) -> Vec<TravelSummary> {
    let start = std::time::Instant::now();
    let group_matches = group_stage_matches(matches);

    let summarize = |team: &Team| {
        let stops = group_stage_stops(team, &group_matches, cities);
        TravelSummary::from_stops(team.code.clone(), &stops)
    };

    #[cfg(feature = "parallel")]
    let mut rows: Vec<TravelSummary> = {
        use rayon::prelude::*;
        teams.par_iter().map(summarize).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let mut rows: Vec<TravelSummary> = teams.iter().map(summarize).collect();

    rank(&mut rows);
    info!("[Report] Ranked group-stage travel for {} teams in {:?}", rows.len(), start.elapsed());
    rows
}

/// Travel over every hypothetical full-tournament path, longest first.
///
/// Each team gets one row per finishing position that has a template for its
/// group: its group-stage stops followed by the resolved knockout stops.
/// Rows are labelled like `MEX (A1)`.
pub fn knockout_travel(
    teams: &[Team],
    matches: &[Match],
    cities: &[City],
    templates: &[KnockoutPathTemplate],
    venues: &KnockoutVenues,
) -> Vec<TravelSummary> {
    let start = std::time::Instant::now();
    let group_matches = group_stage_matches(matches);

    let summarize = |team: &Team| -> Vec<TravelSummary> {
        let group_stops = group_stage_stops(team, &group_matches, cities);

        FinishPosition::ALL
            .iter()
            .filter_map(|&position| {
                let template = find_template(templates, &team.group, position)?;
                let mut stops = group_stops.clone();
                stops.extend(
                    resolve_knockout_path(template, venues, cities)
                        .into_iter()
                        .map(|k| (k.coords, k.city.name.as_str())),
                );
                let label = format!("{} ({}{})", team.code, team.group, position.rank());
                Some(TravelSummary::from_stops(label, &stops))
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    let mut rows: Vec<TravelSummary> = {
        use rayon::prelude::*;
        teams.par_iter().flat_map_iter(summarize).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let mut rows: Vec<TravelSummary> = teams.iter().flat_map(summarize).collect();

    rank(&mut rows);
    info!("[Report] Ranked {} knockout paths in {:?}", rows.len(), start.elapsed());
    rows
}

/// Render ranked rows as a markdown section with a table.
///
/// # Example
///
/// ```rust
/// use worldcup_travel::{render_markdown_table, TravelSummary};
///
/// let rows = vec![TravelSummary {
///     label: "CAN".to_string(),
///     total_km: 3358.4,
///     route: vec!["Toronto".to_string(), "Vancouver".to_string()],
/// }];
/// let table = render_markdown_table("Group stage travel", &rows);
/// assert!(table.contains("| 1 | CAN | 3358 | Toronto → Vancouver |"));
/// ```
pub fn render_markdown_table(title: &str, rows: &[TravelSummary]) -> String {
    let mut lines = vec![
        format!("## {}", title),
        String::new(),
        "| Rank | Team | Distance (km) | Route |".to_string(),
        "|------|------|---------------|-------|".to_string(),
    ];
    lines.extend(rows.iter().enumerate().map(|(i, row)| {
        format!("| {} | {} | {:.0} | {} |", i + 1, row.label, row.total_km, row.route.join(" → "))
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
