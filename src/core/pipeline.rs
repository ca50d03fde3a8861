use std::cmp::Ordering;

use crate::core::{
    distance::distance,
    filters::matches_criteria,
    validation::{validate_coordinate, validate_criteria, ValidationError},
};
use crate::models::{Coordinate, FilterCriteria, Pandal, RankedPandal, SortBy};

/// Rank pandals against the user's criteria and location
///
/// # Pipeline Stages
/// 1. Attach the distance from the user (unknown without a location)
/// 2. Filter by rating, crowd level, area, distance and text
/// 3. Stable sort by the requested key, ties keep input order
///
/// Pure function of its inputs. An empty input or an empty filter result is
/// an empty vector, not an error.
pub fn rank(
    pandals: Vec<Pandal>,
    location: Option<Coordinate>,
    criteria: &FilterCriteria,
) -> Result<Vec<RankedPandal>, ValidationError> {
    if let Some(location) = &location {
        validate_coordinate("location", location)?;
    }
    validate_criteria(criteria)?;

    let mut ranked: Vec<RankedPandal> = pandals
        .into_iter()
        // Stage 1: distance from the user
        .map(|pandal| {
            let distance_km = location.map(|location| distance(location, pandal.location));
            RankedPandal { pandal, distance_km }
        })
        // Stage 2: filter predicates
        .filter(|ranked| matches_criteria(&ranked.pandal, ranked.distance_km, criteria))
        .collect();

    // Stage 3: `sort_by` is stable, so equal keys keep their input order
    match criteria.sort_by {
        SortBy::Distance => ranked.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km)),
        SortBy::Rating => ranked.sort_by(|a, b| {
            b.pandal
                .rating()
                .partial_cmp(&a.pandal.rating())
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::Crowd => ranked.sort_by(|a, b| {
            a.pandal
                .crowd_level
                .weight()
                .partial_cmp(&b.pandal.crowd_level.weight())
                .unwrap_or(Ordering::Equal)
        }),
    }

    tracing::trace!("Ranked {} pandals by {:?}", ranked.len(), criteria.sort_by);

    Ok(ranked)
}

/// Ascending distance, unknown distances last
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
