use std::cmp::Ordering;

use crate::core::{
    distance::distance,
    validation::{validate_starting_point, ValidationError},
};
use crate::models::{Coordinate, Pandal, Route, RoutePreference, RouteStop, StartingPoint};

/// Build a visiting order with the greedy nearest-neighbour heuristic
///
/// From the current position (the starting point, then the last visited
/// pandal) the closest unvisited pandal is appended next. Equal distances go
/// to the higher rated pandal, then to the one earlier in the input.
///
/// The result is locally greedy, not a shortest tour. Each stop records the
/// hop distance from the previous position, so the first stop carries the
/// distance from the starting point.
pub fn build_route(start: &StartingPoint, pandals: Vec<Pandal>) -> Result<Route, ValidationError> {
    validate_starting_point(start)?;

    let mut remaining: Vec<Option<Pandal>> = pandals.into_iter().map(Some).collect();
    let mut stops = Vec::with_capacity(remaining.len());
    let mut current = start.location;

    while let Some((index, hop_km)) = nearest_unvisited(&remaining, current) {
        let Some(pandal) = remaining[index].take() else {
            break;
        };
        current = pandal.location;
        stops.push(RouteStop {
            position: stops.len(),
            pandal,
            distance_from_previous_km: hop_km,
        });
    }

    tracing::debug!("Built route from {} with {} stops", start.name, stops.len());

    Ok(Route {
        start: Some(start.clone()),
        stops,
    })
}

/// Index and distance of the next stop, `None` once every pandal is visited
fn nearest_unvisited(
    remaining: &[Option<Pandal>],
    current: Coordinate,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64, f64)> = None;

    for (index, pandal) in remaining.iter().enumerate() {
        let Some(pandal) = pandal else {
            continue;
        };
        let hop_km = distance(current, pandal.location);
        let rating = pandal.rating();

        // Strict comparisons keep the earliest candidate on a full tie
        let better = match best {
            None => true,
            Some((_, best_km, best_rating)) => {
                hop_km < best_km || (hop_km == best_km && rating > best_rating)
            }
        };
        if better {
            best = Some((index, hop_km, rating));
        }
    }

    best.map(|(index, hop_km, _)| (index, hop_km))
}

/// Re-sort an already built route by a single preference
///
/// This is a display ordering, not a re-routing: hop distances are carried
/// over untouched, so after `HighestRated` or `LessCrowded` the order may no
/// longer be a sensible walking order and `distance_from_previous_km` refers
/// to the stop's neighbour in the original route. Positions are renumbered.
pub fn reorder(mut route: Route, preference: RoutePreference) -> Route {
    match preference {
        RoutePreference::Shortest => route.stops.sort_by(|a, b| {
            a.distance_from_previous_km
                .partial_cmp(&b.distance_from_previous_km)
                .unwrap_or(Ordering::Equal)
        }),
        RoutePreference::HighestRated => route.stops.sort_by(|a, b| {
            b.pandal
                .rating()
                .partial_cmp(&a.pandal.rating())
                .unwrap_or(Ordering::Equal)
        }),
        RoutePreference::LessCrowded => route.stops.sort_by(|a, b| {
            a.pandal
                .crowd_level
                .weight()
                .partial_cmp(&b.pandal.crowd_level.weight())
                .unwrap_or(Ordering::Equal)
        }),
    }

    for (position, stop) in route.stops.iter_mut().enumerate() {
        stop.position = position;
    }

    route
}
