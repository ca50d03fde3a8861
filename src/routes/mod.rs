// Route exports
pub mod pandals;
pub mod plans;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::config::DiscoverySettings;
use crate::core::ValidationError;
use crate::models::{ErrorResponse, Pandal, StartingPoint};
use crate::services::{AppwriteClient, AppwriteError, CacheKey, CacheManager};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub cache: Arc<CacheManager>,
    pub discovery: DiscoverySettings,
    pub starting_points: Arc<Vec<StartingPoint>>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(pandals::configure)
            .configure(plans::configure),
    );
}

/// Fetch a pandal by id or slug, serving recent lookups from cache
pub(crate) async fn fetch_pandal(state: &AppState, key: &str) -> Result<Pandal, AppwriteError> {
    let cache_key = CacheKey::pandal(key);

    if let Ok(pandal) = state.cache.get::<Pandal>(&cache_key).await {
        return Ok(pandal);
    }

    let pandal = state.appwrite.get_pandal(key).await?;

    if let Err(e) = state.cache.set(&cache_key, &pandal).await {
        tracing::warn!("Failed to cache pandal {}: {}", key, e);
    }

    Ok(pandal)
}

pub(crate) fn validation_error_response(err: &ValidationError) -> HttpResponse {
    tracing::info!("Rejected input on {}: {}", err.field(), err);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: err.to_string(),
        status_code: 400,
    })
}

pub(crate) fn store_error_response(context: &str, err: &AppwriteError) -> HttpResponse {
    match err {
        AppwriteError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: format!("{}: {}", context, err),
            status_code: 404,
        }),
        _ => {
            tracing::error!("{}: {}", context, err);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: context.to_string(),
                message: err.to_string(),
                status_code: 502,
            })
        }
    }
}
