use crate::core::{area::classify, distance::is_within_bounding_box};
use crate::models::{CreatePandalRequest, Pandal, PandalPage, PandalQuery};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Handles all communication with the document store:
/// - Listing pandals with equality/range/membership predicates
/// - Fetching a single pandal by document id or slug
/// - Creating pandal documents
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub pandals: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.pandals
        )
    }

    async fn get_json(&self, url: &str) -> Result<Response, AppwriteError> {
        Ok(self
            .client
            .get(url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?)
    }

    /// List pandals matching the query
    ///
    /// Documents that fail to parse or carry out-of-range coordinates are
    /// skipped. When the query has a bounding box, documents outside it are
    /// dropped as well.
    pub async fn list_pandals(&self, query: &PandalQuery) -> Result<PandalPage, AppwriteError> {
        let queries = build_queries(query);
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to encode queries: {}", e)))?;
        let full_url = format!("{}?query={}", self.documents_url(), urlencoding::encode(&queries_json));

        tracing::debug!("Listing pandals with {} query predicates", queries.len());

        let response = self.get_json(&full_url).await?;
        let json = read_json(response, "list pandals").await?;

        let total = json
            .get("total")
            .and_then(|t| t.as_u64())
            .unwrap_or(0) as usize;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let items: Vec<Pandal> = documents
            .iter()
            .filter_map(parse_pandal)
            .filter(|pandal| {
                query
                    .bounding_box
                    .as_ref()
                    .map_or(true, |bbox| is_within_bounding_box(pandal.location, bbox))
            })
            .collect();

        tracing::debug!("Listed {} pandals (total: {})", items.len(), total);

        Ok(PandalPage { items, total })
    }

    /// Get a single pandal by document id, falling back to its slug
    pub async fn get_pandal(&self, key: &str) -> Result<Pandal, AppwriteError> {
        let url = format!("{}/{}", self.documents_url(), urlencoding::encode(key));

        tracing::debug!("Fetching pandal: {}", key);

        let response = self.get_json(&url).await?;
        if response.status() != StatusCode::NOT_FOUND {
            let json = read_json(response, "fetch pandal").await?;
            return parse_document(&json);
        }

        let queries = vec![format!("equal(\"slug\", [{}])", quoted(key)), "limit(1)".to_string()];
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to encode queries: {}", e)))?;
        let full_url = format!("{}?query={}", self.documents_url(), urlencoding::encode(&queries_json));

        let response = self.get_json(&full_url).await?;
        let json = read_json(response, "fetch pandal by slug").await?;

        let doc = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?
            .first()
            .ok_or_else(|| AppwriteError::NotFound(format!("Pandal not found for {}", key)))?;

        parse_document(doc)
    }

    /// Create a pandal document
    ///
    /// The area is classified from the address and the slug derived from the
    /// name when the request leaves them out.
    pub async fn create_pandal(&self, request: CreatePandalRequest) -> Result<Pandal, AppwriteError> {
        let area = request.area.unwrap_or_else(|| classify(&request.address));
        let slug = request
            .slug
            .filter(|slug| !slug.trim().is_empty())
            .unwrap_or_else(|| slugify(&request.name));

        let payload = json!({
            "documentId": uuid::Uuid::new_v4().to_string(),
            "data": {
                "slug": slug,
                "name": request.name,
                "description": request.description,
                "address": request.address,
                "latitude": request.latitude,
                "longitude": request.longitude,
                "rating": request.rating,
                "crowdLevel": request.crowd_level,
                "area": area,
                "imageFileIds": request.image_file_ids,
            }
        });

        let response = self
            .client
            .post(self.documents_url())
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .json(&payload)
            .send()
            .await?;

        let json = read_json(response, "create pandal").await?;
        let pandal = parse_document(&json)?;

        tracing::debug!("Created pandal {} in area {}", pandal.id, pandal.area.as_str());

        Ok(pandal)
    }
}

/// Translate a pandal query into Appwrite query strings
pub fn build_queries(query: &PandalQuery) -> Vec<String> {
    let mut queries = Vec::new();

    if let Some(area) = query.area {
        queries.push(format!("equal(\"area\", [{}])", quoted(area.as_str())));
    }

    if let Some(min_rating) = query.min_rating {
        queries.push(format!("greaterThanEqual(\"rating\", {})", min_rating));
    }

    if !query.crowd_levels.is_empty() {
        let levels = query
            .crowd_levels
            .iter()
            .map(|level| quoted(level.as_str()))
            .collect::<Vec<_>>()
            .join(",");
        queries.push(format!("equal(\"crowdLevel\", [{}])", levels));
    }

    if let Some(bbox) = &query.bounding_box {
        queries.push(format!("greaterThanEqual(\"latitude\", {})", bbox.min_lat));
        queries.push(format!("lessThanEqual(\"latitude\", {})", bbox.max_lat));
        // A box over every longitude constrains latitude only
        if bbox.min_lon > -180.0 || bbox.max_lon < 180.0 {
            queries.push(format!("greaterThanEqual(\"longitude\", {})", bbox.min_lon));
            queries.push(format!("lessThanEqual(\"longitude\", {})", bbox.max_lon));
        }
    }

    if let Some(limit) = query.limit {
        queries.push(format!("limit({})", limit));
    }

    queries
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Lowercase, alphanumeric words joined by dashes
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

async fn read_json(response: Response, action: &str) -> Result<Value, AppwriteError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(AppwriteError::Unauthorized);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(AppwriteError::NotFound(format!("Failed to {}: {}", action, status)));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Failed to {}: {} - {}", action, status, body);
        return Err(AppwriteError::ApiError(format!("Failed to {}: {}", action, status)));
    }

    Ok(response.json().await?)
}

fn parse_document(doc: &Value) -> Result<Pandal, AppwriteError> {
    let data = doc.get("data").unwrap_or(doc);

    let pandal: Pandal = serde_json::from_value(data.clone())
        .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse pandal: {}", e)))?;

    pandal
        .location
        .validate()
        .map_err(|e| AppwriteError::InvalidResponse(format!("Pandal {}: {}", pandal.id, e)))?;

    Ok(pandal)
}

fn parse_pandal(doc: &Value) -> Option<Pandal> {
    match parse_document(doc) {
        Ok(pandal) => Some(pandal),
        Err(e) => {
            tracing::warn!("Skipping pandal document: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculate_bounding_box;
    use crate::models::{Area, BoundingBox, Coordinate, CrowdLevel};

    #[test]
    fn test_appwrite_client_creation() {
        let collections = AppwriteCollections {
            pandals: "pandals".to_string(),
        };

        let client = AppwriteClient::new(
            "https://appwrite.test/v1/".to_string(),
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            collections,
        )
        .unwrap();

        assert_eq!(client.api_key, "test_key");
        assert_eq!(
            client.documents_url(),
            "https://appwrite.test/v1/databases/test_db/collections/pandals/documents"
        );
    }

    #[test]
    fn test_build_queries() {
        let query = PandalQuery {
            area: Some(Area::SaltLake),
            min_rating: Some(4.5),
            crowd_levels: vec![CrowdLevel::Low, CrowdLevel::MediumHigh],
            bounding_box: Some(BoundingBox {
                min_lat: 22.5,
                max_lat: 22.6,
                min_lon: 88.3,
                max_lon: 88.4,
            }),
            limit: Some(100),
        };

        let queries = build_queries(&query);

        assert_eq!(queries[0], r#"equal("area", ["salt-lake"])"#);
        assert_eq!(queries[1], r#"greaterThanEqual("rating", 4.5)"#);
        assert_eq!(queries[2], r#"equal("crowdLevel", ["low","medium-high"])"#);
        assert_eq!(queries[3], r#"greaterThanEqual("latitude", 22.5)"#);
        assert_eq!(queries.last().map(String::as_str), Some("limit(100)"));
        assert_eq!(queries.len(), 8);
    }

    #[test]
    fn test_full_longitude_box_skips_longitude_predicates() {
        let query = PandalQuery {
            bounding_box: Some(calculate_bounding_box(
                Coordinate { latitude: 0.0, longitude: -179.95 },
                20.0,
            )),
            ..Default::default()
        };

        let queries = build_queries(&query);

        assert_eq!(queries.len(), 2);
        assert!(queries.iter().all(|q| q.contains("\"latitude\"")));
    }

    #[test]
    fn test_empty_query_has_no_predicates() {
        assert!(build_queries(&PandalQuery::default()).is_empty());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Santosh Mitra Square"), "santosh-mitra-square");
        assert_eq!(slugify("  Bagbazar  Sarbojanin!! "), "bagbazar-sarbojanin");
    }

    #[test]
    fn test_parse_document_rejects_bad_coordinates() {
        let doc = json!({
            "$id": "p1",
            "name": "Broken",
            "latitude": 122.0,
            "longitude": 88.3
        });

        assert!(matches!(parse_document(&doc), Err(AppwriteError::InvalidResponse(_))));
        assert!(parse_pandal(&doc).is_none());
    }

    #[test]
    fn test_parse_document_defaults() {
        let doc = json!({
            "$id": "p1",
            "name": "Kalighat Milan Sangha",
            "latitude": 22.5204,
            "longitude": 88.3462,
            "$collectionId": "pandals"
        });

        let pandal = parse_document(&doc).unwrap();
        assert_eq!(pandal.crowd_level, CrowdLevel::Medium);
        assert_eq!(pandal.area, Area::Other);
        assert_eq!(pandal.rating(), 0.0);
    }
}
