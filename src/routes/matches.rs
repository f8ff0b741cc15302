use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::collections::HashSet;
use validator::Validate;

use crate::models::{
    FindMatchesRequest, FindMatchesResponse, HealthResponse, RecommendationsRequest,
    RecommendationsResponse, ScorePairRequest,
};
use crate::routes::{error_response, store_error_response, AppState};
use crate::services::{CacheKey, PostgresError};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommendations))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/score", web::post().to(score_pair));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 10
/// }
/// ```
///
/// Users the anchor already interacted with are left out.
/// Lists computed without the full exclusion set are served but not cached.
async fn recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendationsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let user_id = &req.user_id;
    let limit = state.matching.resolve_limit(req.limit);

    // Read before the exclusion set so a concurrent invalidation orphans our write
    let generation = match state.cache.generation(user_id).await {
        Ok(generation) => Some(generation),
        Err(e) => {
            tracing::warn!("Recommendation cache generation unavailable for {}: {}", user_id, e);
            None
        }
    };
    let cache_key = generation.map(|g| CacheKey::recommendations(user_id, g, limit));

    if let Some(key) = &cache_key {
        match state.cache.get::<RecommendationsResponse>(key).await {
            Ok(cached) => {
                tracing::debug!("Serving cached recommendations for {}", user_id);
                return HttpResponse::Ok().json(cached);
            }
            Err(e) if !e.is_miss() => {
                tracing::warn!("Recommendation cache read failed for {}: {}", user_id, e);
            }
            Err(_) => {}
        }
    }

    tracing::info!("Computing recommendations for user: {}, limit: {}", user_id, limit);

    let anchor = match state.postgres.get_profile(user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return store_error_response("Failed to fetch user profile", &e);
        }
    };

    let candidates = match state.postgres.list_other_profiles(user_id).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to list candidates for {}: {}", user_id, e);
            return store_error_response("Failed to list candidates", &e);
        }
    };

    let (interacted, exclusions_complete) =
        resolve_exclusions(user_id, state.postgres.get_interacted_ids(user_id).await);

    let result = state.matcher.recommend(&anchor, &candidates, &interacted, limit);

    let response = RecommendationsResponse {
        user_id: user_id.clone(),
        recommendations: result.matches,
        total_candidates: result.total_candidates,
    };

    match cacheable_key(cache_key, exclusions_complete) {
        Some(key) => {
            if let Err(e) = state.cache.set(&key, &response).await {
                tracing::warn!("Failed to cache recommendations for {}: {}", user_id, e);
            }
        }
        None => tracing::debug!("Not caching recommendations for {}", user_id),
    }

    tracing::info!(
        "Returning {} recommendations for user {} (from {} candidates)",
        response.recommendations.len(),
        user_id,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Exclusion set for a recommendation run and whether it is complete
///
/// A store failure yields an empty set flagged incomplete.
fn resolve_exclusions(
    user_id: &str,
    fetched: Result<HashSet<String>, PostgresError>,
) -> (HashSet<String>, bool) {
    match fetched {
        Ok(ids) => (ids, true),
        Err(e) => {
            tracing::warn!("Failed to fetch interaction history for {}, proceeding without exclusions: {}", user_id, e);
            (HashSet::new(), false)
        }
    }
}

/// Key to store a computed list under, if it may be cached at all
fn cacheable_key(cache_key: Option<String>, exclusions_complete: bool) -> Option<String> {
    cache_key.filter(|_| exclusions_complete)
}

/// Filtered search endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "industry": "string",
///   "location": "string",
///   "interests": ["string"],
///   "minScore": 40,
///   "limit": 20
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let user_id = &req.user_id;
    let limit = state.matching.resolve_limit(req.limit);

    let anchor = match state.postgres.get_profile(user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return store_error_response("Failed to fetch user profile", &e);
        }
    };

    // Industry and location are pushed down to the query; the matcher re-checks them
    let candidates = match state
        .postgres
        .list_candidates(
            user_id,
            req.filters.industry.as_deref().filter(|s| !s.is_empty()),
            req.filters.location.as_deref().filter(|s| !s.is_empty()),
        )
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query candidates for {}: {}", user_id, e);
            return store_error_response("Failed to query candidates", &e);
        }
    };

    let mut result = state.matcher.find_matches(&anchor, &candidates, &req.filters);
    result.matches.truncate(limit);

    tracing::info!(
        "Returning {} filtered matches for user {} (from {} candidates)",
        result.matches.len(),
        user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    })
}

/// Score two supplied profiles without touching the stores
///
/// POST /api/v1/matches/score
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScorePairRequest>,
) -> impl Responder {
    HttpResponse::Ok().json(state.matcher.score(&req.anchor, &req.candidate))
}
