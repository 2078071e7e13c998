//! Build a team's itinerary and print its flight paths.
//!
//! Run with: cargo run --example team_itinerary

use worldcup_travel::{
    build_itinerary, group_stage_travel, match_day, render_markdown_table, City, GeoPoint,
    Match, PathConfig, Point2D, Stage, Team,
};

/// Equirectangular projection onto a 1000x600 canvas around North America.
fn project(p: GeoPoint) -> Point2D {
    Point2D {
        x: (p.lng + 130.0) / 70.0 * 1000.0,
        y: (55.0 - p.lat) / 40.0 * 600.0,
    }
}

fn main() {
    let cities = vec![
        City::new("hou", "Houston", 29.6847, -95.4107),
        City::new("kc", "Kansas City", 39.0489, -94.4839),
        City::new("tor", "Toronto", 43.6332, -79.4186),
        City::new("phi", "Philadelphia", 39.9008, -75.1675),
    ];

    let teams = vec![
        Team::new("GER", "Germany", "E"),
        Team::new("CUW", "Curaçao", "E"),
        Team::new("CIV", "Côte d'Ivoire", "E"),
        Team::new("ECU", "Ecuador", "E"),
    ];

    let matches = vec![
        Match::new(10, "E", "GER", "CUW", "hou", "2026-06-14T12:00:00-05:00", Stage::Group),
        Match::new(9, "E", "CIV", "ECU", "phi", "2026-06-14T19:00:00-04:00", Stage::Group),
        Match::new(33, "E", "GER", "CIV", "tor", "2026-06-20T16:00:00-04:00", Stage::Group),
        Match::new(34, "E", "ECU", "CUW", "kc", "2026-06-20T20:00:00-05:00", Stage::Group),
        Match::new(55, "E", "CUW", "CIV", "phi", "2026-06-25T16:00:00-04:00", Stage::Group),
        Match::new(56, "E", "ECU", "GER", "hou", "2026-06-25T16:00:00-04:00", Stage::Group),
    ];

    let itinerary = build_itinerary("GER", &matches, &cities);
    let config = PathConfig::default();

    println!("GER itinerary\n");
    for stop in &itinerary.stops {
        let day = match_day(&stop.fixture.datetime, "America/New_York").unwrap_or_default();
        println!("  {}  match {:>3}  {}", day, stop.fixture.id, stop.city.name);
    }

    println!("\nFlight segments\n");
    for segment in &itinerary.segments {
        let path = config.flight_path(project(segment.from), project(segment.to), segment);
        println!(
            "  #{} {:.0} km  same_city={} return={}  chevrons={}",
            segment.segment_index,
            segment.distance_km(),
            segment.is_same_city,
            segment.is_return,
            path.chevron_marks().len()
        );
        println!("     d=\"{}\"", path);
    }

    println!("\nTotal: {:.0} km\n", itinerary.total_distance_km());

    let ranking = group_stage_travel(&teams, &matches, &cities);
    print!("{}", render_markdown_table("Group E travel", &ranking));
}
