use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{
    calculate_bounding_box, is_within_bounding_box, rank, validation::validate_coordinate,
    ValidationError,
};
use crate::models::{
    BoundingBox, Coordinate, CreatePandalRequest, ErrorResponse, FilterCriteria, HealthResponse,
    NearbyPandalsRequest, NearbyPandalsResponse, Pandal, PandalPage, PandalQuery,
};
use crate::routes::{fetch_pandal, store_error_response, validation_error_response, AppState};
use crate::services::CacheKey;

/// Configure all pandal-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/pandals/nearby", web::post().to(nearby_pandals))
        .route("/pandals/{key}", web::get().to(get_pandal))
        .route("/pandals", web::post().to(create_pandal));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cached_entries: state.cache.stats().l1_size,
        timestamp: chrono::Utc::now(),
    })
}

/// Find pandals around the user
///
/// POST /api/v1/pandals/nearby
///
/// Request body:
/// ```json
/// {
///   "latitude": 22.5646,
///   "longitude": 88.3514,
///   "maxDistanceKm": 5,
///   "minRating": 4,
///   "crowdLevels": ["low", "medium"],
///   "areas": ["north"],
///   "textQuery": "park",
///   "sortBy": "distance",
///   "limit": 20
/// }
/// ```
/// Location fields may be omitted when the user has not shared a location.
async fn nearby_pandals(
    state: web::Data<AppState>,
    req: web::Json<NearbyPandalsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for nearby request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let location = match user_location(&req) {
        Ok(location) => location,
        Err(e) => return validation_error_response(&e),
    };

    let limit = req.limit.min(state.discovery.max_limit) as usize;
    let query = build_store_query(location, &req.criteria, state.discovery.fetch_limit);

    let (page, stale) = load_snapshot(&state, &query).await;
    let total_candidates = page.total.max(page.items.len());

    let mut pandals = match rank(page.items, location, &req.criteria) {
        Ok(pandals) => pandals,
        Err(e) => return validation_error_response(&e),
    };
    pandals.truncate(limit);

    tracing::info!(
        "Returning {} pandals (from {} candidates, stale: {})",
        pandals.len(),
        total_candidates,
        stale
    );

    HttpResponse::Ok().json(NearbyPandalsResponse {
        pandals,
        total_candidates,
        stale,
    })
}

/// Both coordinates or neither
fn user_location(req: &NearbyPandalsRequest) -> Result<Option<Coordinate>, ValidationError> {
    match (req.latitude, req.longitude) {
        (Some(latitude), Some(longitude)) => {
            let location = Coordinate { latitude, longitude };
            validate_coordinate("location", &location).map(|_| Some(location))
        }
        (None, None) => Ok(None),
        (Some(_), None) => Err(ValidationError::EmptyField { field: "longitude" }),
        (None, Some(_)) => Err(ValidationError::EmptyField { field: "latitude" }),
    }
}

/// Push the cheap predicates down to the store
///
/// The pipeline re-applies every predicate, so the store query only needs to
/// be a superset of the final result.
fn build_store_query(
    location: Option<Coordinate>,
    criteria: &FilterCriteria,
    fetch_limit: usize,
) -> PandalQuery {
    let area = if criteria.areas.len() == 1 {
        criteria.areas.iter().next().copied()
    } else {
        None
    };

    let bounding_box = match (location, criteria.max_distance_km) {
        (Some(center), Some(radius_km)) if radius_km.is_finite() && radius_km >= 0.0 => {
            Some(calculate_bounding_box(center, radius_km))
        }
        _ => None,
    };

    PandalQuery {
        area,
        min_rating: criteria.min_rating,
        crowd_levels: criteria.crowd_levels.iter().copied().collect(),
        bounding_box,
        limit: Some(fetch_limit),
    }
}

/// Fetch a listing, falling back to the last cached snapshot or an empty set
///
/// Snapshots are keyed without the bounding box. A listing limited to a box
/// is merged into the snapshot, and a fallback snapshot is cut back down to
/// the current box.
async fn load_snapshot(state: &AppState, query: &PandalQuery) -> (PandalPage, bool) {
    let cache_key = CacheKey::snapshot(query);

    match state.appwrite.list_pandals(query).await {
        Ok(page) => {
            let snapshot = match query.bounding_box {
                Some(_) => {
                    let previous = state.cache.get::<PandalPage>(&cache_key).await.unwrap_or_default();
                    merge_snapshot(previous, &page.items)
                }
                None => page.clone(),
            };
            if let Err(e) = state.cache.set(&cache_key, &snapshot).await {
                tracing::warn!("Failed to cache pandal listing: {}", e);
            }
            (page, false)
        }
        Err(e) => {
            tracing::warn!("Pandal store unavailable, using cached snapshot: {}", e);
            let snapshot = state.cache.get::<PandalPage>(&cache_key).await.unwrap_or_default();
            (within_box(snapshot, query.bounding_box.as_ref()), true)
        }
    }
}

/// Fold freshly listed pandals into a snapshot, newer documents replacing older ones
fn merge_snapshot(mut snapshot: PandalPage, items: &[Pandal]) -> PandalPage {
    for pandal in items {
        match snapshot.items.iter_mut().find(|known| known.id == pandal.id) {
            Some(known) => *known = pandal.clone(),
            None => snapshot.items.push(pandal.clone()),
        }
    }
    snapshot.total = snapshot.items.len();
    snapshot
}

fn within_box(mut page: PandalPage, bbox: Option<&BoundingBox>) -> PandalPage {
    if let Some(bbox) = bbox {
        page.items.retain(|pandal| is_within_bounding_box(pandal.location, bbox));
        page.total = page.items.len();
    }
    page
}

/// Get a pandal by document id or slug
///
/// GET /api/v1/pandals/{key}
async fn get_pandal(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let key = path.into_inner();

    match fetch_pandal(&state, &key).await {
        Ok(pandal) => HttpResponse::Ok().json(pandal),
        Err(e) => store_error_response("Failed to fetch pandal", &e),
    }
}

/// Add a pandal
///
/// POST /api/v1/pandals
async fn create_pandal(
    state: web::Data<AppState>,
    req: web::Json<CreatePandalRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let pandal: Pandal = match state.appwrite.create_pandal(req.into_inner()).await {
        Ok(pandal) => pandal,
        Err(e) => return store_error_response("Failed to create pandal", &e),
    };

    // Snapshots pick the new pandal up on the next successful listing
    for key in [&pandal.id, &pandal.slug] {
        if let Err(e) = state.cache.set(&CacheKey::pandal(key), &pandal).await {
            tracing::warn!("Failed to cache pandal {}: {}", key, e);
        }
    }

    tracing::info!("Created pandal {} ({})", pandal.name, pandal.id);

    HttpResponse::Created().json(pandal)
}
