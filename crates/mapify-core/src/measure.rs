//! Geodesic measurement helpers: distance, path length, polygon area,
//! and human-readable formatting.

use crate::geometry::LatLng;

/// Spherical earth radius in meters (WGS84 equatorial).
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Great-circle distance between two coordinates in meters (haversine).
pub fn distance_m(a: LatLng, b: LatLng) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Total length of a polyline in meters.
pub fn path_length_m(path: &[LatLng]) -> f64 {
    path.windows(2).map(|w| distance_m(w[0], w[1])).sum()
}

/// Area of a polygon (open ring, ≥ 3 vertices) in square meters.
///
/// Spherical excess approximation; plenty accurate for drawn shapes,
/// degrades for polygons spanning a large fraction of the globe.
pub fn area_sq_m(path: &[LatLng]) -> f64 {
    if path.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..path.len() {
        let p1 = path[i];
        let p2 = path[(i + 1) % path.len()];
        let lambda1 = p1.lng.to_radians();
        let lambda2 = p2.lng.to_radians();
        let phi1 = p1.lat.to_radians();
        let phi2 = p2.lat.to_radians();
        sum += (lambda2 - lambda1) * (2.0 + phi1.sin() + phi2.sin());
    }
    (sum * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
}

/// Formats a distance: meters below 1 km, kilometers above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1_000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.2} km", meters / 1_000.0)
    }
}

/// Formats an area: m² below a hectare, then hectares, then km².
pub fn format_area(sq_meters: f64) -> String {
    if sq_meters < 10_000.0 {
        format!("{sq_meters:.0} m²")
    } else {
        let hectares = sq_meters / 10_000.0;
        if hectares < 100.0 {
            format!("{hectares:.2} ha")
        } else {
            format!("{:.2} km²", sq_meters / 1_000_000.0)
        }
    }
}
