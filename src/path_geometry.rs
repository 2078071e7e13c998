//! # Flight Path Geometry
//!
//! Curved flight lines and same-city loops in screen (pixel) space.
//!
//! All functions are pure: identical input gives bit-identical output, which
//! lets renderers diff path data between frames. Paths come back as
//! [`PathSpec`] values that render to SVG path `d` strings via
//! [`PathSpec::to_svg`].
//!
//! ## Overview
//!
//! | Function | Shape |
//! |----------|-------|
//! | [`arc_path`] | Quadratic curve bowed to one side of the straight line |
//! | [`chevron_path`] | The same curve sampled into a polyline for chevron glyphs |
//! | [`loop_path`] | Cubic loop above a point, for back-to-back matches in one city |
//! | [`loop_chevron_path`] | The same loop sampled into a polyline |
//!
//! ## Example
//!
//! ```rust
//! use worldcup_travel::{arc_path, chevron_path, Point2D};
//!
//! let start = Point2D { x: 0.0, y: 0.0 };
//! let end = Point2D { x: 100.0, y: 0.0 };
//!
//! let arc = arc_path(start, end, 0.5);
//! assert_eq!(arc.to_svg(), "M 0 0 Q 50 -50 100 0");
//!
//! // 100px at 20px spacing: 5 segments, 6 samples
//! let sampled = chevron_path(start, end, 0.5, 20.0);
//! assert_eq!(sampled.points().len(), 6);
//! ```

use std::fmt;

use geo::{Coord, LineString};

use crate::FlightSegment;

/// A point in screen space.
pub type Point2D = Coord<f64>;

/// Below this start-to-end distance an arc collapses to a straight line.
pub const MIN_ARC_DISTANCE: f64 = 1.0;

/// Minimum number of segments in a sampled arc.
pub const MIN_ARC_SEGMENTS: usize = 3;

/// Minimum number of segments in a sampled loop.
pub const MIN_LOOP_SEGMENTS: usize = 4;

// Loop shape, in units of the loop radius (y grows downward on screen)
const LOOP_ANCHOR: f64 = 0.7;
const LOOP_CONTROL_X: f64 = 1.5;
const LOOP_CONTROL_Y: f64 = 1.8;

// =============================================================================
// Path Data
// =============================================================================

/// Structured path data, independent of any renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSpec {
    /// Straight segment (`M .. L ..`)
    Line { start: Point2D, end: Point2D },
    /// Quadratic Bezier (`M .. Q ..`)
    Quadratic { start: Point2D, control: Point2D, end: Point2D },
    /// Cubic Bezier (`M .. C ..`)
    Cubic { start: Point2D, control1: Point2D, control2: Point2D, end: Point2D },
    /// Sampled curve (`M .. L .. L ..`)
    Polyline(LineString<f64>),
}

/// A direction glyph placed on a sampled path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChevronMark {
    pub at: Point2D,
    /// Heading toward the next sample, degrees clockwise from +x in screen space
    pub angle_degrees: f64,
}

impl PathSpec {
    /// Defining points: endpoints and control points for curves, every sample
    /// for polylines.
    pub fn points(&self) -> Vec<Point2D> {
        match self {
            PathSpec::Line { start, end } => vec![*start, *end],
            PathSpec::Quadratic { start, control, end } => vec![*start, *control, *end],
            PathSpec::Cubic { start, control1, control2, end } => {
                vec![*start, *control1, *control2, *end]
            }
            PathSpec::Polyline(line) => line.0.clone(),
        }
    }

    /// First point of the path.
    pub fn start(&self) -> Option<Point2D> {
        match self {
            PathSpec::Line { start, .. }
            | PathSpec::Quadratic { start, .. }
            | PathSpec::Cubic { start, .. } => Some(*start),
            PathSpec::Polyline(line) => line.0.first().copied(),
        }
    }

    /// Last point of the path.
    pub fn end(&self) -> Option<Point2D> {
        match self {
            PathSpec::Line { end, .. }
            | PathSpec::Quadratic { end, .. }
            | PathSpec::Cubic { end, .. } => Some(*end),
            PathSpec::Polyline(line) => line.0.last().copied(),
        }
    }

    /// Chevron placements at the interior samples of a polyline.
    ///
    /// Curves and straight lines carry no samples and return an empty list.
    pub fn chevron_marks(&self) -> Vec<ChevronMark> {
        let PathSpec::Polyline(line) = self else {
            return Vec::new();
        };
        let coords = &line.0;
        if coords.len() < 3 {
            return Vec::new();
        }

        (1..coords.len() - 1)
            .map(|i| {
                let next = coords[i + 1];
                let at = coords[i];
                ChevronMark {
                    at,
                    angle_degrees: (next.y - at.y).atan2(next.x - at.x).to_degrees(),
                }
            })
            .collect()
    }

    /// Render as an SVG path `d` attribute.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSpec::Line { start, end } => {
                write!(f, "M {} {} L {} {}", start.x, start.y, end.x, end.y)
            }
            PathSpec::Quadratic { start, control, end } => write!(
                f,
                "M {} {} Q {} {} {} {}",
                start.x, start.y, control.x, control.y, end.x, end.y
            ),
            PathSpec::Cubic { start, control1, control2, end } => write!(
                f,
                "M {} {} C {} {} {} {} {} {}",
                start.x, start.y, control1.x, control1.y, control2.x, control2.y, end.x, end.y
            ),
            PathSpec::Polyline(line) => {
                for (i, c) in line.0.iter().enumerate() {
                    if i == 0 {
                        write!(f, "M {} {}", c.x, c.y)?;
                    } else {
                        write!(f, " L {} {}", c.x, c.y)?;
                    }
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// Arcs
// =============================================================================

/// Control point of the quadratic arc, or `None` when start and end are
/// closer than [`MIN_ARC_DISTANCE`].
///
/// The bend direction is the unit direction rotated by -90 degrees, flipped
/// for negative curvature.
fn arc_control(start: Point2D, end: Point2D, curvature: f64) -> Option<(Point2D, f64)> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let distance = dx.hypot(dy);

    if !(distance >= MIN_ARC_DISTANCE) {
        return None;
    }

    let sign = if curvature < 0.0 { -1.0 } else { 1.0 };
    let perp_x = sign * (dy / distance);
    let perp_y = sign * (-dx / distance);
    let offset = distance * curvature.abs();

    let control = Coord {
        x: (start.x + end.x) / 2.0 + perp_x * offset,
        y: (start.y + end.y) / 2.0 + perp_y * offset,
    };

    Some((control, distance))
}

/// Curved flight line from `start` to `end`.
///
/// `curvature` scales the bow-out as a fraction of the straight-line distance;
/// its sign picks the side. Endpoints closer than [`MIN_ARC_DISTANCE`] give a
/// straight [`PathSpec::Line`].
///
/// # Example
///
/// ```rust
/// use worldcup_travel::{arc_path, PathSpec, Point2D};
///
/// let p = Point2D { x: 10.0, y: 10.0 };
/// let nearly_p = Point2D { x: 10.5, y: 10.0 };
/// assert!(matches!(arc_path(p, nearly_p, 0.3), PathSpec::Line { .. }));
/// ```
pub fn arc_path(start: Point2D, end: Point2D, curvature: f64) -> PathSpec {
    match arc_control(start, end, curvature) {
        Some((control, _)) => PathSpec::Quadratic { start, control, end },
        None => PathSpec::Line { start, end },
    }
}

/// The [`arc_path`] curve sampled into `max(3, floor(distance / segment_spacing))`
/// straight segments.
///
/// The first and last samples equal `start` and `end` exactly. Short
/// distances give a straight [`PathSpec::Line`].
pub fn chevron_path(start: Point2D, end: Point2D, curvature: f64, segment_spacing: f64) -> PathSpec {
    let Some((control, distance)) = arc_control(start, end, curvature) else {
        return PathSpec::Line { start, end };
    };

    let n = segment_count(distance, segment_spacing, MIN_ARC_SEGMENTS);
    let coords = (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            quadratic_at(start, control, end, t)
        })
        .collect();

    PathSpec::Polyline(LineString::new(coords))
}

// =============================================================================
// Loops
// =============================================================================

fn loop_points(center: Point2D, radius: f64) -> [Point2D; 4] {
    let at = |fx: f64, fy: f64| Coord {
        x: center.x + radius * fx,
        y: center.y + radius * fy,
    };
    [
        at(LOOP_ANCHOR, -LOOP_ANCHOR),
        at(LOOP_CONTROL_X, -LOOP_CONTROL_Y),
        at(-LOOP_CONTROL_X, -LOOP_CONTROL_Y),
        at(-LOOP_ANCHOR, -LOOP_ANCHOR),
    ]
}

/// Decorative loop above `center`, drawn when a team stays in the same city
/// between consecutive matches.
///
/// # Example
///
/// ```rust
/// use worldcup_travel::{loop_path, Point2D};
///
/// let path = loop_path(Point2D { x: 0.0, y: 0.0 }, 10.0);
/// assert_eq!(path.to_svg(), "M 7 -7 C 15 -18 -15 -18 -7 -7");
/// ```
pub fn loop_path(center: Point2D, radius: f64) -> PathSpec {
    let [start, control1, control2, end] = loop_points(center, radius);
    PathSpec::Cubic { start, control1, control2, end }
}

/// The [`loop_path`] curve sampled into `max(4, floor(1.5 * chord / segment_spacing))`
/// straight segments, where `chord` is the start-to-end distance.
pub fn loop_chevron_path(center: Point2D, radius: f64, segment_spacing: f64) -> PathSpec {
    let [start, control1, control2, end] = loop_points(center, radius);
    let approx_length = 1.5 * (end.x - start.x).hypot(end.y - start.y);

    let n = segment_count(approx_length, segment_spacing, MIN_LOOP_SEGMENTS);
    let coords = (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            cubic_at(start, control1, control2, end, t)
        })
        .collect();

    PathSpec::Polyline(LineString::new(coords))
}

// =============================================================================
// Sampling
// =============================================================================

fn segment_count(length: f64, spacing: f64, min: usize) -> usize {
    let n = (length / spacing).floor();
    if !(spacing > 0.0) || !n.is_finite() {
        return min;
    }
    // Saturates at usize::MAX
    (n as usize).max(min)
}

fn quadratic_at(p0: Point2D, c: Point2D, p1: Point2D, t: f64) -> Point2D {
    let mt = 1.0 - t;
    Coord {
        x: mt * mt * p0.x + 2.0 * mt * t * c.x + t * t * p1.x,
        y: mt * mt * p0.y + 2.0 * mt * t * c.y + t * t * p1.y,
    }
}

fn cubic_at(p0: Point2D, c1: Point2D, c2: Point2D, p1: Point2D, t: f64) -> Point2D {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Coord {
        x: a * p0.x + b * c1.x + c * c2.x + d * p1.x,
        y: a * p0.y + b * c1.y + c * c2.y + d * p1.y,
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Styling knobs for turning flight segments into paths.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathConfig {
    /// Bow-out of a first-time leg as a fraction of its length.
    /// Default: 0.2
    pub curvature: f64,

    /// Bow-out of a repeated leg. Opposite sign so a round trip draws as two
    /// separate arcs instead of one line on top of the other.
    /// Default: -0.35
    pub return_curvature: f64,

    /// Pixel distance between chevron samples.
    /// Default: 24.0
    pub segment_spacing: f64,

    /// Radius of the same-city loop in pixels.
    /// Default: 18.0
    pub loop_radius: f64,

    /// Sample paths into polylines for chevron glyphs.
    /// Default: true
    pub chevrons: bool,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            curvature: 0.2,
            return_curvature: -0.35,
            segment_spacing: 24.0,
            loop_radius: 18.0,
            chevrons: true,
        }
    }
}

impl PathConfig {
    /// Path for a flight segment whose endpoints are already projected to
    /// screen space.
    ///
    /// Same-city segments become a loop at `start`; repeated legs use
    /// `return_curvature`.
    pub fn flight_path(&self, start: Point2D, end: Point2D, segment: &FlightSegment) -> PathSpec {
        if segment.is_same_city {
            return if self.chevrons {
                loop_chevron_path(start, self.loop_radius, self.segment_spacing)
            } else {
                loop_path(start, self.loop_radius)
            };
        }

        let curvature = if segment.is_return { self.return_curvature } else { self.curvature };
        if self.chevrons {
            chevron_path(start, end, curvature, self.segment_spacing)
        } else {
            arc_path(start, end, curvature)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoPoint;

    fn pt(x: f64, y: f64) -> Point2D {
        Coord { x, y }
    }

    fn dist(a: Point2D, b: Point2D) -> f64 {
        (b.x - a.x).hypot(b.y - a.y)
    }

    fn segment(is_same_city: bool, is_return: bool) -> FlightSegment {
        FlightSegment {
            from: GeoPoint::new(29.76, -95.37),
            to: GeoPoint::new(39.10, -94.58),
            segment_index: 0,
            is_return,
            is_same_city,
        }
    }

    #[test]
    fn test_arc_control_point_side() {
        let PathSpec::Quadratic { control, .. } = arc_path(pt(0.0, 0.0), pt(100.0, 0.0), 0.5) else {
            panic!("expected quadratic");
        };
        assert_eq!(control, pt(50.0, -50.0));

        let PathSpec::Quadratic { control, .. } = arc_path(pt(0.0, 0.0), pt(100.0, 0.0), -0.5) else {
            panic!("expected quadratic");
        };
        assert_eq!(control, pt(50.0, 50.0));
    }

    #[test]
    fn test_arc_zero_curvature_controls_at_midpoint() {
        let PathSpec::Quadratic { control, .. } = arc_path(pt(0.0, 0.0), pt(0.0, 80.0), 0.0) else {
            panic!("expected quadratic");
        };
        assert_eq!(control, pt(0.0, 40.0));
    }

    #[test]
    fn test_arc_svg_structure() {
        let svg = arc_path(pt(10.0, 20.0), pt(200.0, 150.0), 0.25).to_svg();
        let m = svg.find('M').unwrap();
        let q = svg.find('Q').unwrap();
        assert!(m < q);
    }

    #[test]
    fn test_arc_degenerate_is_line() {
        let path = arc_path(pt(5.0, 5.0), pt(5.5, 5.5), 0.4);
        assert_eq!(path, PathSpec::Line { start: pt(5.0, 5.0), end: pt(5.5, 5.5) });
        assert_eq!(path.to_svg(), "M 5 5 L 5.5 5.5");
        assert_eq!(path.points().len(), 2);
    }

    #[test]
    fn test_chevron_sample_count() {
        // distance 250, spacing 20 -> 12 segments
        let path = chevron_path(pt(0.0, 0.0), pt(150.0, 200.0), 0.2, 20.0);
        assert_eq!(path.points().len(), 13);

        // short arc still gets the minimum of 3 segments
        let path = chevron_path(pt(0.0, 0.0), pt(30.0, 0.0), 0.2, 20.0);
        assert_eq!(path.points().len(), 4);
    }

    #[test]
    fn test_chevron_endpoints_exact() {
        let start = pt(12.345, 67.891);
        let end = pt(-210.5, 333.25);
        let path = chevron_path(start, end, -0.3, 17.0);
        assert_eq!(path.start(), Some(start));
        assert_eq!(path.end(), Some(end));
    }

    #[test]
    fn test_chevron_follows_arc() {
        // Midpoint sample of a quadratic is halfway between chord midpoint and control
        let path = chevron_path(pt(0.0, 0.0), pt(100.0, 0.0), 0.5, 25.0);
        let points = path.points();
        assert_eq!(points.len(), 5);
        assert_eq!(points[2], pt(50.0, -25.0));
    }

    #[test]
    fn test_chevron_degenerate_is_line() {
        let path = chevron_path(pt(1.0, 1.0), pt(1.0, 1.5), 0.2, 10.0);
        assert!(matches!(path, PathSpec::Line { .. }));
    }

    #[test]
    fn test_chevron_bad_spacing_uses_minimum() {
        let path = chevron_path(pt(0.0, 0.0), pt(500.0, 0.0), 0.2, 0.0);
        assert_eq!(path.points().len(), MIN_ARC_SEGMENTS + 1);

        let path = chevron_path(pt(0.0, 0.0), pt(500.0, 0.0), 0.2, -5.0);
        assert_eq!(path.points().len(), MIN_ARC_SEGMENTS + 1);
    }

    #[test]
    fn test_chevron_dense_sampling_is_not_capped() {
        let path = chevron_path(pt(0.0, 0.0), pt(1500.0, 0.0), 0.2, 0.1);
        assert_eq!(path.points().len(), 15_001);
        assert_eq!(segment_count(200_000.0, 2.0, MIN_ARC_SEGMENTS), 100_000);
    }

    #[test]
    fn test_chevron_marks() {
        let path = chevron_path(pt(0.0, 0.0), pt(100.0, 0.0), 0.0, 25.0);
        let marks = path.chevron_marks();
        assert_eq!(marks.len(), 3);
        for mark in &marks {
            assert!(mark.angle_degrees.abs() < 1e-9);
        }
        assert!(arc_path(pt(0.0, 0.0), pt(100.0, 0.0), 0.2).chevron_marks().is_empty());
    }

    #[test]
    fn test_loop_shape() {
        let center = pt(100.0, 100.0);
        let path = loop_path(center, 20.0);
        let PathSpec::Cubic { start, control1, control2, end } = path else {
            panic!("expected cubic");
        };
        assert_eq!(start, pt(114.0, 86.0));
        assert_eq!(end, pt(86.0, 86.0));
        assert_eq!(control1, pt(130.0, 64.0));
        assert_eq!(control2, pt(70.0, 64.0));
    }

    #[test]
    fn test_loop_endpoints_distance_from_center() {
        let center = pt(-40.0, 25.0);
        for r in [1.0, 7.5, 18.0, 300.0] {
            let path = loop_path(center, r);
            let expected = r * 0.7 * 2f64.sqrt();
            assert!((dist(center, path.start().unwrap()) - expected).abs() < 1e-9);
            assert!((dist(center, path.end().unwrap()) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_loop_zero_radius() {
        let center = pt(3.0, 4.0);
        let path = loop_path(center, 0.0);
        assert!(path.points().iter().all(|p| *p == center));

        let sampled = loop_chevron_path(center, 0.0, 10.0);
        assert_eq!(sampled.points().len(), MIN_LOOP_SEGMENTS + 1);
    }

    #[test]
    fn test_loop_chevron_sample_count() {
        // chord = 1.4 * 100 = 140, approx length 210, spacing 10 -> 21 segments
        let sampled = loop_chevron_path(pt(0.0, 0.0), 100.0, 10.0);
        assert_eq!(sampled.points().len(), 22);

        let loop_curve = loop_path(pt(0.0, 0.0), 100.0);
        assert_eq!(sampled.start(), loop_curve.start());
        assert_eq!(sampled.end(), loop_curve.end());
    }

    #[test]
    fn test_paths_are_deterministic() {
        let a = pt(13.7, 99.1);
        let b = pt(401.3, -7.9);
        assert_eq!(arc_path(a, b, 0.37), arc_path(a, b, 0.37));
        assert_eq!(chevron_path(a, b, 0.37, 11.0), chevron_path(a, b, 0.37, 11.0));
        assert_eq!(loop_path(a, 13.0), loop_path(a, 13.0));
        assert_eq!(loop_chevron_path(a, 13.0, 3.0), loop_chevron_path(a, 13.0, 3.0));
    }

    #[test]
    fn test_polyline_svg() {
        let path = PathSpec::Polyline(LineString::new(vec![pt(0.0, 0.0), pt(1.5, 2.0), pt(3.0, 0.0)]));
        assert_eq!(path.to_svg(), "M 0 0 L 1.5 2 L 3 0");
    }

    #[test]
    fn test_flight_path_dispatch() {
        let config = PathConfig::default();
        let a = pt(0.0, 0.0);
        let b = pt(300.0, 0.0);

        let same_city = config.flight_path(a, a, &segment(true, false));
        assert_eq!(same_city, loop_chevron_path(a, config.loop_radius, config.segment_spacing));

        let first = config.flight_path(a, b, &segment(false, false));
        assert_eq!(first, chevron_path(a, b, config.curvature, config.segment_spacing));

        let repeat = config.flight_path(a, b, &segment(false, true));
        assert_eq!(repeat, chevron_path(a, b, config.return_curvature, config.segment_spacing));

        let plain = PathConfig { chevrons: false, ..PathConfig::default() };
        assert!(matches!(plain.flight_path(a, b, &segment(false, false)), PathSpec::Quadratic { .. }));
        assert!(matches!(plain.flight_path(a, a, &segment(true, false)), PathSpec::Cubic { .. }));
    }
}
