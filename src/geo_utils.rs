//! # Geographic Utilities
//!
//! Great-circle distances between host cities and the map-framing helpers
//! used when a team's route is selected.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_km`] | Great-circle distance between two points in kilometers |
//! | [`path_length_km`] | Total length of an ordered sequence of points |
//! | [`compute_bounds`] | Bounding box of a set of points |
//! | [`compute_center`] | Centroid of a set of points |
//!
//! ## Example
//!
//! ```rust
//! use worldcup_travel::{GeoPoint, geo_utils};
//!
//! let route = vec![
//!     GeoPoint::new(29.7604, -95.3698),  // Houston
//!     GeoPoint::new(39.0997, -94.5786),  // Kansas City
//!     GeoPoint::new(32.7767, -96.7970),  // Dallas
//! ];
//!
//! let length = geo_utils::path_length_km(&route);
//! println!("Route length: {:.0} km", length);
//!
//! let bounds = geo_utils::compute_bounds(&route).unwrap();
//! println!("Bounds: {:.2}N to {:.2}N", bounds.min_lat, bounds.max_lat);
//! ```
//!
//! ## Algorithm Notes
//!
//! ### Haversine Formula
//!
//! Distances assume a spherical Earth of radius 6,371 km. Accurate to within
//! 0.5% of the ellipsoidal distance, which is more than enough for ranking
//! travel between stadiums.
//!
//! Reference: [Haversine formula (Wikipedia)](https://en.wikipedia.org/wiki/Haversine_formula)

use crate::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two points using the Haversine formula.
///
/// Returns kilometers. Identical points give exactly `0.0`; NaN coordinates
/// propagate to a NaN result.
///
/// Written out by hand rather than calling [`geo::Haversine`], which uses a
/// 6,371.0088 km mean radius. Travel rankings and published distances are
/// pinned to [`EARTH_RADIUS_KM`] = 6,371 km, so the two differ by about
/// 1.4 ppm.
///
/// # Example
///
/// ```rust
/// use worldcup_travel::{GeoPoint, geo_utils};
///
/// let new_york = GeoPoint::new(40.7128, -74.0060);
/// let los_angeles = GeoPoint::new(34.0522, -118.2437);
///
/// let distance = geo_utils::haversine_km(&new_york, &los_angeles);
/// assert!((distance - 3936.0).abs() < 10.0);
/// ```
#[inline]
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Calculate the total length of an ordered sequence of points in kilometers.
///
/// Sums the haversine distance between consecutive points. Empty or
/// single-point input returns 0.0.
///
/// # Example
///
/// ```rust
/// use worldcup_travel::{GeoPoint, geo_utils};
///
/// let houston = GeoPoint::new(29.76, -95.37);
/// let kansas_city = GeoPoint::new(39.10, -94.58);
///
/// // Staying in Houston adds nothing
/// let length = geo_utils::path_length_km(&[houston, houston, kansas_city]);
/// assert_eq!(length, geo_utils::haversine_km(&houston, &kansas_city));
/// ```
pub fn path_length_km(points: &[GeoPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| haversine_km(&w[0], &w[1]))
        .sum()
}

// =============================================================================
// Bounding Box / Center Functions
// =============================================================================

/// Bounding box of a set of points, used to fit the map to a route.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Get the center point of the bounds.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Grow the box by `margin` degrees on every side.
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            min_lat: self.min_lat - margin,
            max_lat: self.max_lat + margin,
            min_lng: self.min_lng - margin,
            max_lng: self.max_lng + margin,
        }
    }
}

/// Compute the bounding box of a set of points.
///
/// Returns `None` for empty input.
///
/// # Example
///
/// ```rust
/// use worldcup_travel::{GeoPoint, geo_utils};
///
/// let points = vec![
///     GeoPoint::new(25.9580, -80.2389),
///     GeoPoint::new(49.2768, -123.1120),
/// ];
///
/// let bounds = geo_utils::compute_bounds(&points).unwrap();
/// assert_eq!(bounds.min_lat, 25.9580);
/// assert_eq!(bounds.max_lng, -80.2389);
/// ```
pub fn compute_bounds(points: &[GeoPoint]) -> Option<Bounds> {
    if points.is_empty() {
        return None;
    }

    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;

    for p in points {
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
        min_lng = min_lng.min(p.lng);
        max_lng = max_lng.max(p.lng);
    }

    Some(Bounds { min_lat, max_lat, min_lng, max_lng })
}

/// Compute the arithmetic centroid of a set of points.
///
/// Returns (0, 0) for empty input. Assumes the points do not straddle the
/// antimeridian.
pub fn compute_center(points: &[GeoPoint]) -> GeoPoint {
    if points.is_empty() {
        return GeoPoint::new(0.0, 0.0);
    }

    let sum_lat: f64 = points.iter().map(|p| p.lat).sum();
    let sum_lng: f64 = points.iter().map(|p| p.lng).sum();
    let n = points.len() as f64;

    GeoPoint::new(sum_lat / n, sum_lng / n)
}

// =============================================================================
// Unit Tests
// =============================================================================
