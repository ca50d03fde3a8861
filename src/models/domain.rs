use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Named area used for coarse classification and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Area {
    North,
    South,
    Central,
    SaltLake,
    NewTown,
    Howrah,
    DumDum,
    #[default]
    Other,
}

impl Area {
    pub fn as_str(&self) -> &'static str {
        match self {
            Area::North => "north",
            Area::South => "south",
            Area::Central => "central",
            Area::SaltLake => "salt-lake",
            Area::NewTown => "new-town",
            Area::Howrah => "howrah",
            Area::DumDum => "dum-dum",
            Area::Other => "other",
        }
    }
}

/// Expected visitor density at a pandal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CrowdLevel {
    Low,
    #[default]
    Medium,
    MediumHigh,
    High,
}

impl CrowdLevel {
    /// Ordinal weight used when ordering by crowd (less crowded first)
    #[inline]
    pub fn weight(&self) -> f64 {
        match self {
            CrowdLevel::Low => 1.0,
            CrowdLevel::Medium => 2.0,
            CrowdLevel::MediumHigh => 2.5,
            CrowdLevel::High => 3.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrowdLevel::Low => "low",
            CrowdLevel::Medium => "medium",
            CrowdLevel::MediumHigh => "medium-high",
            CrowdLevel::High => "high",
        }
    }
}

/// Pandal document as stored in the document database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pandal {
    #[serde(rename = "$id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(flatten)]
    pub location: Coordinate,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "crowdLevel", default)]
    pub crowd_level: CrowdLevel,
    #[serde(default)]
    pub area: Area,
    #[serde(rename = "imageFileIds", default)]
    pub image_file_ids: Vec<String>,
    #[serde(rename = "$createdAt", alias = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Pandal {
    /// Helper to get the rating, treating a missing rating as 0
    #[inline]
    pub fn rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// Pandal with its distance from the user, when the user location is known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPandal {
    #[serde(flatten)]
    pub pandal: Pandal,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

/// Ordering applied by the discovery pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Distance,
    Rating,
    Crowd,
}

/// Every option the discovery pipeline recognizes
///
/// A missing option, an empty set or a blank text query leaves that
/// dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(rename = "maxDistanceKm", default)]
    pub max_distance_km: Option<f64>,
    #[serde(rename = "minRating", default)]
    pub min_rating: Option<f64>,
    #[serde(rename = "crowdLevels", default)]
    pub crowd_levels: HashSet<CrowdLevel>,
    #[serde(default)]
    pub areas: HashSet<Area>,
    #[serde(rename = "textQuery", default)]
    pub text_query: Option<String>,
    #[serde(rename = "sortBy", default)]
    pub sort_by: SortBy,
}

/// User chosen place a route starts from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartingPoint {
    pub name: String,
    #[serde(flatten)]
    pub location: Coordinate,
}

/// One stop of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub pandal: Pandal,
    #[serde(rename = "distanceFromPreviousKm")]
    pub distance_from_previous_km: f64,
    pub position: usize,
}

/// Ordered visiting sequence, rebuilt on demand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub start: Option<StartingPoint>,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
}

impl Route {
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// How an already built route should be re-sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePreference {
    Shortest,
    HighestRated,
    LessCrowded,
}

/// Summary metrics for a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    #[serde(rename = "totalDistanceKm")]
    pub total_distance_km: f64,
    #[serde(rename = "stopCount")]
    pub stop_count: usize,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "areaCounts")]
    pub area_counts: BTreeMap<Area, usize>,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Query pushed down to the document store
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PandalQuery {
    pub area: Option<Area>,
    pub min_rating: Option<f64>,
    pub crowd_levels: Vec<CrowdLevel>,
    pub bounding_box: Option<BoundingBox>,
    pub limit: Option<usize>,
}

/// One page of pandals returned by the document store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PandalPage {
    pub items: Vec<Pandal>,
    pub total: usize,
}
