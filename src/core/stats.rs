use std::collections::BTreeMap;

use crate::models::{Route, RouteSummary};

/// Aggregate a route into summary metrics
///
/// The average rating of an empty route is 0.
pub fn summarize(route: &Route) -> RouteSummary {
    let stop_count = route.stops.len();

    let total_distance_km = route
        .stops
        .iter()
        .map(|stop| stop.distance_from_previous_km)
        .sum::<f64>();

    let average_rating = if stop_count > 0 {
        route.stops.iter().map(|stop| stop.pandal.rating()).sum::<f64>() / stop_count as f64
    } else {
        0.0
    };

    let mut area_counts = BTreeMap::new();
    for stop in &route.stops {
        *area_counts.entry(stop.pandal.area).or_insert(0) += 1;
    }

    RouteSummary {
        total_distance_km,
        stop_count,
        average_rating,
        area_counts,
    }
}
