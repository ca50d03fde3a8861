use actix_web::{web, HttpResponse, Responder};
use std::collections::HashSet;
use validator::Validate;

use crate::core::{build_route, reorder, summarize};
use crate::models::{ErrorResponse, PlanRouteRequest, ReorderRouteRequest, Route, RoutePlanResponse};
use crate::routes::{fetch_pandal, store_error_response, validation_error_response, AppState};

/// Configure all route-planning routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/routes/starting-points", web::get().to(starting_points))
        .route("/routes/plan", web::post().to(plan_route))
        .route("/routes/reorder", web::post().to(reorder_route));
}

/// Configured starting point presets
///
/// GET /api/v1/routes/starting-points
async fn starting_points(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.starting_points.as_ref())
}

/// Plan a route through the selected pandals
///
/// POST /api/v1/routes/plan
///
/// Request body:
/// ```json
/// {
///   "start": { "name": "Shyambazar Metro", "latitude": 22.6009, "longitude": 88.3746 },
///   "pandalIds": ["bagbazar-sarbojanin", "kumartuli-park"],
///   "preference": "highest_rated"
/// }
/// ```
async fn plan_route(
    state: web::Data<AppState>,
    req: web::Json<PlanRouteRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();

    // A pandal selected twice is visited once
    let mut seen = HashSet::new();
    let keys: Vec<&String> = req.pandal_ids.iter().filter(|id| seen.insert(id.as_str())).collect();

    if keys.len() > state.discovery.max_route_stops {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: format!(
                "pandalIds: at most {} stops per route",
                state.discovery.max_route_stops
            ),
            status_code: 400,
        });
    }

    let mut pandals = Vec::with_capacity(keys.len());
    for key in keys {
        match fetch_pandal(&state, key).await {
            Ok(pandal) => pandals.push(pandal),
            Err(e) => return store_error_response(&format!("Failed to fetch pandal {}", key), &e),
        }
    }

    let route = match build_route(&req.start, pandals) {
        Ok(route) => route,
        Err(e) => return validation_error_response(&e),
    };

    let route = match req.preference {
        Some(preference) => reorder(route, preference),
        None => route,
    };

    respond_with_route(route)
}

/// Re-sort a planned route without re-routing it
///
/// POST /api/v1/routes/reorder
async fn reorder_route(req: web::Json<ReorderRouteRequest>) -> impl Responder {
    let req = req.into_inner();
    respond_with_route(reorder(req.route, req.preference))
}

fn respond_with_route(route: Route) -> HttpResponse {
    let summary = summarize(&route);

    tracing::info!(
        "Route with {} stops, {:.2} km",
        summary.stop_count,
        summary.total_distance_km
    );

    HttpResponse::Ok().json(RoutePlanResponse { route, summary })
}
