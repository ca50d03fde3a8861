//! Pandal Route - pandal discovery and route planning service
//!
//! The core ranks pandals against user criteria and the user's location and
//! orders a selection of them into a walking route. Everything in [`core`] is
//! pure and synchronous; [`services`] and [`routes`] wrap it in an HTTP service
//! backed by an Appwrite document store.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_route, classify, distance, rank, reorder, summarize, ValidationError};
pub use crate::models::{
    Area, Coordinate, CrowdLevel, FilterCriteria, Pandal, RankedPandal, Route, RoutePreference,
    RouteStop, RouteSummary, SortBy, StartingPoint,
};
