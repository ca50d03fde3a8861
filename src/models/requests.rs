use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Area, CrowdLevel, FilterCriteria, Route, RoutePreference, StartingPoint};

/// Request to discover pandals around the user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyPandalsRequest {
    /// Absent when the user has not granted location access
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(flatten)]
    pub criteria: FilterCriteria,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    50
}

/// Request to plan a route through the selected pandals
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlanRouteRequest {
    pub start: StartingPoint,
    #[validate(length(min = 1, max = 50))]
    #[serde(rename = "pandalIds")]
    pub pandal_ids: Vec<String>,
    #[serde(default)]
    pub preference: Option<RoutePreference>,
}

/// Request to re-sort a previously planned route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRouteRequest {
    pub route: Route,
    pub preference: RoutePreference,
}

/// Request to add a pandal to the store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePandalRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "crowdLevel", default)]
    pub crowd_level: CrowdLevel,
    /// Classified from the address when omitted
    #[serde(default)]
    pub area: Option<Area>,
    #[serde(rename = "imageFileIds", default)]
    pub image_file_ids: Vec<String>,
}
