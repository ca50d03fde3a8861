use serde::{Deserialize, Serialize};
use crate::models::domain::{RankedPandal, Route, RouteSummary};

/// Response for the nearby pandals endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyPandalsResponse {
    pub pandals: Vec<RankedPandal>,
    pub total_candidates: usize,
    /// Set when the store was unreachable and a cached or empty snapshot was used
    pub stale: bool,
}

/// Route together with its summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlanResponse {
    pub route: Route,
    pub summary: RouteSummary,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached_entries: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
