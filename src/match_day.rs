//! Match-day bucketing.
//!
//! Groups kickoffs into tournament days as seen from one reference time zone.
//! Kickoffs before the cutover hour (06:00 by default) belong to the previous
//! day's slate, so a 01:00 Eastern kickoff in Vancouver still shows up under
//! the evening it was played.
//!
//! Inputs are not validated: malformed datetimes, unknown zone names and
//! malformed dates come back as `None`.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike};
use chrono_tz::Tz;
use log::debug;

use crate::Match;

/// Hour (reference-zone wall clock) before which a kickoff counts toward the previous day.
pub const DEFAULT_CUTOVER_HOUR: u32 = 6;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Configuration for match-day bucketing.
#[derive(Debug, Clone)]
pub struct MatchDayConfig {
    /// Zone whose wall clock defines a day.
    /// Default: America/New_York
    pub reference_zone: Tz,

    /// Kickoffs before this hour belong to the previous day.
    /// Default: 6
    pub cutover_hour: u32,

    /// Day 1 of the tournament.
    /// Default: 2026-06-11
    pub tournament_start: NaiveDate,
}

impl Default for MatchDayConfig {
    fn default() -> Self {
        Self {
            reference_zone: chrono_tz::America::New_York,
            cutover_hour: DEFAULT_CUTOVER_HOUR,
            tournament_start: NaiveDate::from_ymd_opt(2026, 6, 11).unwrap_or_default(),
        }
    }
}

impl MatchDayConfig {
    /// Tournament day a kickoff belongs to.
    pub fn bucket(&self, kickoff: &DateTime<FixedOffset>) -> NaiveDate {
        let local = kickoff.with_timezone(&self.reference_zone);
        let date = local.date_naive();
        if local.hour() < self.cutover_hour {
            date - Duration::days(1)
        } else {
            date
        }
    }

    /// Tournament day of a match, `None` if its datetime is malformed.
    pub fn bucket_match(&self, m: &Match) -> Option<NaiveDate> {
        m.kickoff().map(|k| self.bucket(&k))
    }

    /// 1-based day number, counting `tournament_start` as day 1.
    pub fn day_number(&self, bucket: NaiveDate) -> i64 {
        (bucket - self.tournament_start).num_days() + 1
    }
}

/// Tournament day bucket (`YYYY-MM-DD`) of an ISO-8601 `datetime` as seen
/// from `reference_zone`, with the default 06:00 cutover.
///
/// Returns `None` if `datetime` has no parseable offset or the zone name is
/// not an IANA zone.
///
/// # Example
///
/// ```rust
/// use worldcup_travel::match_day;
///
/// assert_eq!(match_day("2026-06-12T05:30:00-04:00", "America/New_York").as_deref(), Some("2026-06-11"));
/// assert_eq!(match_day("2026-06-12T06:30:00-04:00", "America/New_York").as_deref(), Some("2026-06-12"));
/// ```
pub fn match_day(datetime: &str, reference_zone: &str) -> Option<String> {
    let kickoff = DateTime::parse_from_rfc3339(datetime).ok()?;
    let zone: Tz = reference_zone.parse().ok()?;

    let config = MatchDayConfig { reference_zone: zone, ..MatchDayConfig::default() };
    Some(config.bucket(&kickoff).format(DATE_FORMAT).to_string())
}

/// Whole calendar days from `start_date` to `date_bucket`, plus one.
///
/// # Example
///
/// ```rust
/// use worldcup_travel::tournament_day_number;
///
/// assert_eq!(tournament_day_number("2026-06-11", "2026-06-11"), Some(1));
/// assert_eq!(tournament_day_number("2026-07-19", "2026-06-11"), Some(39));
/// ```
pub fn tournament_day_number(date_bucket: &str, start_date: &str) -> Option<i64> {
    let bucket = NaiveDate::parse_from_str(date_bucket, DATE_FORMAT).ok()?;
    let start = NaiveDate::parse_from_str(start_date, DATE_FORMAT).ok()?;
    Some((bucket - start).num_days() + 1)
}

/// Group matches by tournament day for the day-selection control.
///
/// Within a day matches are in kickoff order (input order on ties). Matches
/// with a malformed datetime are left out.
pub fn group_by_match_day<'a>(
    matches: &'a [Match],
    config: &MatchDayConfig,
) -> BTreeMap<NaiveDate, Vec<&'a Match>> {
    let mut days: BTreeMap<NaiveDate, Vec<(DateTime<FixedOffset>, &Match)>> = BTreeMap::new();

    for m in matches {
        match m.kickoff() {
            Some(kickoff) => days.entry(config.bucket(&kickoff)).or_default().push((kickoff, m)),
            None => debug!("[MatchDay] Skipping match {} with unparseable datetime {:?}", m.id, m.datetime),
        }
    }

    days.into_iter()
        .map(|(day, mut entries)| {
            entries.sort_by_key(|(kickoff, _)| *kickoff);
            (day, entries.into_iter().map(|(_, m)| m).collect())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stage;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn fixture(id: u32, datetime: &str) -> Match {
        Match::new(id, "A", "MEX", "RSA", "mex", datetime, Stage::Group)
    }

    #[test]
    fn test_cutover_boundary() {
        let zone = "America/New_York";
        assert_eq!(match_day("2026-06-12T05:59:00-04:00", zone).as_deref(), Some("2026-06-11"));
        assert_eq!(match_day("2026-06-12T06:00:00-04:00", zone).as_deref(), Some("2026-06-12"));
        assert_eq!(match_day("2026-06-12T00:00:00-04:00", zone).as_deref(), Some("2026-06-11"));
    }

    #[test]
    fn test_converts_into_reference_zone() {
        // 22:00 in Vancouver is 01:00 next day in New York, still the previous slate
        assert_eq!(
            match_day("2026-06-13T22:00:00-07:00", "America/New_York").as_deref(),
            Some("2026-06-13")
        );
        // 03:30 UTC is 23:30 the day before in New York
        assert_eq!(
            match_day("2026-06-20T03:30:00Z", "America/New_York").as_deref(),
            Some("2026-06-19")
        );
        // Same instant, Mexico City wall clock is 21:30
        assert_eq!(
            match_day("2026-06-20T03:30:00Z", "America/Mexico_City").as_deref(),
            Some("2026-06-19")
        );
    }

    #[test]
    fn test_previous_day_crosses_month() {
        assert_eq!(
            match_day("2026-07-01T02:00:00-04:00", "America/New_York").as_deref(),
            Some("2026-06-30")
        );
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(match_day("2026-06-12 15:00", "America/New_York"), None);
        assert_eq!(match_day("2026-06-12T15:00:00-04:00", "Mars/Olympus_Mons"), None);
        assert_eq!(tournament_day_number("June 12", "2026-06-11"), None);
    }

    #[test]
    fn test_tournament_day_number() {
        assert_eq!(tournament_day_number("2026-06-11", "2026-06-11"), Some(1));
        assert_eq!(tournament_day_number("2026-06-12", "2026-06-11"), Some(2));
        assert_eq!(tournament_day_number("2026-06-10", "2026-06-11"), Some(0));
    }

    #[test]
    fn test_config_day_number() {
        let config = MatchDayConfig::default();
        assert_eq!(config.day_number(date("2026-06-11")), 1);
        assert_eq!(config.day_number(date("2026-07-19")), 39);
    }

    #[test]
    fn test_custom_cutover() {
        let config = MatchDayConfig { cutover_hour: 0, ..MatchDayConfig::default() };
        let kickoff = DateTime::parse_from_rfc3339("2026-06-12T02:00:00-04:00").unwrap();
        assert_eq!(config.bucket(&kickoff), date("2026-06-12"));
    }

    #[test]
    fn test_group_by_match_day() {
        let matches = vec![
            fixture(3, "2026-06-12T21:00:00-04:00"),
            fixture(1, "2026-06-11T15:00:00-04:00"),
            fixture(2, "2026-06-12T01:00:00-04:00"),
            fixture(4, "garbage"),
            fixture(5, "2026-06-12T12:00:00-04:00"),
        ];
        let days = group_by_match_day(&matches, &MatchDayConfig::default());

        assert_eq!(days.len(), 2);
        let first: Vec<u32> = days[&date("2026-06-11")].iter().map(|m| m.id).collect();
        assert_eq!(first, vec![1, 2]);
        let second: Vec<u32> = days[&date("2026-06-12")].iter().map(|m| m.id).collect();
        assert_eq!(second, vec![5, 3]);
    }
}
