// Core algorithm exports
pub mod area;
pub mod distance;
pub mod filters;
pub mod pipeline;
pub mod route;
pub mod stats;
pub mod validation;

pub use area::classify;
pub use distance::{calculate_bounding_box, distance, haversine_distance, is_within_bounding_box};
pub use filters::matches_criteria;
pub use pipeline::rank;
pub use route::{build_route, reorder};
pub use stats::summarize;
pub use validation::ValidationError;
