// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Area, BoundingBox, Coordinate, CrowdLevel, FilterCriteria, Pandal, PandalPage, PandalQuery,
    RankedPandal, Route, RoutePreference, RouteStop, RouteSummary, SortBy, StartingPoint,
};
pub use requests::{CreatePandalRequest, NearbyPandalsRequest, PlanRouteRequest, ReorderRouteRequest};
pub use responses::{ErrorResponse, HealthResponse, NearbyPandalsResponse, RoutePlanResponse};
