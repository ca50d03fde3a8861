use std::f64::consts::FRAC_PI_2;

use crate::models::{BoundingBox, Coordinate};

/// Earth's mean radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Slack added to bounding box deltas to absorb rounding at the edge
const BOX_MARGIN_DEG: f64 = 1e-9;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` slightly past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two coordinates in kilometers
#[inline]
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Calculate a bounding box around a center point
///
/// Every point within `radius_km` of `center` lies inside the box, so it can
/// be pushed down to the store as a pre-filter. The latitude span is the
/// angular radius; the longitude half-width is the great-circle extent
/// `asin(sin(r/R) / cos(lat))`. A box that reaches a pole or crosses the
/// antimeridian covers the full longitude range instead.
pub fn calculate_bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    let angular_radius = radius_km / EARTH_RADIUS_KM;
    let lat_delta = angular_radius.to_degrees() + BOX_MARGIN_DEG;

    let min_lat = center.latitude - lat_delta;
    let max_lat = center.latitude + lat_delta;

    let ratio = angular_radius.sin() / center.latitude.to_radians().cos();
    let full_range = min_lat <= -90.0
        || max_lat >= 90.0
        || angular_radius >= FRAC_PI_2
        || !(0.0..1.0).contains(&ratio);

    let (min_lon, max_lon) = if full_range {
        (-180.0, 180.0)
    } else {
        let lon_delta = ratio.asin().to_degrees() + BOX_MARGIN_DEG;
        let (min_lon, max_lon) = (center.longitude - lon_delta, center.longitude + lon_delta);
        if min_lon < -180.0 || max_lon > 180.0 {
            (-180.0, 180.0)
        } else {
            (min_lon, max_lon)
        }
    };

    BoundingBox {
        min_lat: min_lat.max(-90.0),
        max_lat: max_lat.min(90.0),
        min_lon,
        max_lon,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: Coordinate, bbox: &BoundingBox) -> bool {
    point.latitude >= bbox.min_lat
        && point.latitude <= bbox.max_lat
        && point.longitude >= bbox.min_lon
        && point.longitude <= bbox.max_lon
}
