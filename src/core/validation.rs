use thiserror::Error;

use crate::models::{Coordinate, FilterCriteria, StartingPoint};

/// Input rejected by the core before any computation runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: latitude {value} is outside [-90, 90]")]
    InvalidLatitude { field: &'static str, value: f64 },

    #[error("{field}: longitude {value} is outside [-180, 180]")]
    InvalidLongitude { field: &'static str, value: f64 },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field}: {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidLatitude { field, .. }
            | ValidationError::InvalidLongitude { field, .. }
            | ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range or non-finite values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let coordinate = Self { latitude, longitude };
        validate_coordinate("coordinate", &coordinate)?;
        Ok(coordinate)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_coordinate("coordinate", self)
    }
}

pub fn validate_coordinate(field: &'static str, coordinate: &Coordinate) -> Result<(), ValidationError> {
    let Coordinate { latitude, longitude } = *coordinate;

    // NaN fails both range checks
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::InvalidLatitude { field, value: latitude });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::InvalidLongitude { field, value: longitude });
    }

    Ok(())
}

pub fn validate_starting_point(start: &StartingPoint) -> Result<(), ValidationError> {
    if start.name.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "start.name" });
    }
    validate_coordinate("start", &start.location)
}

pub fn validate_criteria(criteria: &FilterCriteria) -> Result<(), ValidationError> {
    if let Some(max_distance_km) = criteria.max_distance_km {
        if !max_distance_km.is_finite() || max_distance_km < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "maxDistanceKm",
                value: max_distance_km,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
    }

    if let Some(min_rating) = criteria.min_rating {
        if !(0.0..=5.0).contains(&min_rating) {
            return Err(ValidationError::OutOfRange {
                field: "minRating",
                value: min_rating,
                min: 0.0,
                max: 5.0,
            });
        }
    }

    Ok(())
}
