use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::core::{mutual_connections, network_strength};
use crate::models::{
    ConnectionStatus, InteractionMetadata, InteractionType, MutualConnectionsResponse,
    NetworkStrengthResponse, NetworkingInteraction, TrackInteractionRequest,
    TrackInteractionResponse, UserPairRequest,
};
use crate::routes::{error_response, store_error_response, AppState, UserQuery};

/// Configure interaction tracking and network routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/interactions", web::post().to(track_interaction))
        .route("/interactions/history", web::get().to(interaction_history))
        .route("/connections/request", web::post().to(send_connection_request))
        .route("/connections/mutual", web::get().to(get_mutual_connections))
        .route("/profiles/like", web::post().to(like_profile))
        .route("/network/strength", web::get().to(get_network_strength));
}

/// Persist an interaction, bump the pair's score boost and drop stale recommendations
///
/// Only the insert is critical; the boost and cache steps log and continue.
async fn track(state: &AppState, interaction: NetworkingInteraction) -> HttpResponse {
    if let Err(e) = state.postgres.record_interaction(&interaction).await {
        tracing::error!("Failed to record interaction: {}", e);
        return store_error_response("Failed to record interaction", &e);
    }

    if let Err(e) = state
        .postgres
        .upsert_score_boost(&interaction.from_user_id, &interaction.to_user_id, interaction.interaction_type)
        .await
    {
        tracing::warn!(
            "Interaction recorded but score boost update failed for {} -> {}: {}",
            interaction.from_user_id,
            interaction.to_user_id,
            e
        );
    }

    if let Err(e) = state.cache.invalidate_user(&interaction.from_user_id).await {
        tracing::warn!("Failed to invalidate cache: {}", e);
    }

    HttpResponse::Ok().json(TrackInteractionResponse {
        success: true,
        interaction_id: interaction.id,
    })
}

/// Track interaction endpoint
///
/// POST /api/v1/interactions
///
/// Request body:
/// ```json
/// {
///   "fromUserId": "string",
///   "toUserId": "string",
///   "type": "view|like|message|meeting|connection",
///   "metadata": { "kind": "note", "text": "string" }
/// }
/// ```
async fn track_interaction(
    state: web::Data<AppState>,
    req: web::Json<TrackInteractionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let interaction_type = match req.interaction_type.parse::<InteractionType>() {
        Ok(t) => t,
        Err(message) => {
            return error_response(StatusCode::BAD_REQUEST, "Invalid interaction type", message);
        }
    };

    let req = req.into_inner();
    let interaction = NetworkingInteraction::new(
        req.from_user_id,
        req.to_user_id,
        interaction_type,
        req.metadata,
    );

    track(&state, interaction).await
}

/// POST /api/v1/connections/request
async fn send_connection_request(
    state: web::Data<AppState>,
    req: web::Json<UserPairRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let req = req.into_inner();
    let metadata = InteractionMetadata::ConnectionRequest {
        status: ConnectionStatus::Pending,
        requested_at: Utc::now(),
    };

    tracing::info!("Connection request: {} -> {}", req.from_user_id, req.to_user_id);

    track(
        &state,
        NetworkingInteraction::new(req.from_user_id, req.to_user_id, InteractionType::Connection, Some(metadata)),
    )
    .await
}

/// POST /api/v1/profiles/like
async fn like_profile(
    state: web::Data<AppState>,
    req: web::Json<UserPairRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let req = req.into_inner();
    let metadata = InteractionMetadata::Like { liked_at: Utc::now() };

    track(
        &state,
        NetworkingInteraction::new(req.from_user_id, req.to_user_id, InteractionType::Like, Some(metadata)),
    )
    .await
}

/// Interaction history, newest first
///
/// GET /api/v1/interactions/history?userId={userId}
async fn interaction_history(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    match state.postgres.get_interaction_history(&query.user_id).await {
        Ok(history) => HttpResponse::Ok().json(history),
        Err(e) => {
            tracing::error!("Failed to fetch interaction history for {}: {}", query.user_id, e);
            store_error_response("Failed to fetch interaction history", &e)
        }
    }
}

#[derive(Debug, Deserialize)]
struct MutualQuery {
    #[serde(rename = "userId1")]
    user_id_1: String,
    #[serde(rename = "userId2")]
    user_id_2: String,
}

/// GET /api/v1/connections/mutual?userId1={id}&userId2={id}
async fn get_mutual_connections(
    state: web::Data<AppState>,
    query: web::Query<MutualQuery>,
) -> impl Responder {
    let (first, second) = match tokio::try_join!(
        state.postgres.get_connection_ids(&query.user_id_1),
        state.postgres.get_connection_ids(&query.user_id_2),
    ) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(
                "Failed to fetch connections for {} / {}: {}",
                query.user_id_1,
                query.user_id_2,
                e
            );
            return store_error_response("Failed to fetch connections", &e);
        }
    };

    let mutual = mutual_connections(&first, &second);

    HttpResponse::Ok().json(MutualConnectionsResponse {
        count: mutual.len(),
        mutual,
    })
}

/// GET /api/v1/network/strength?userId={userId}
async fn get_network_strength(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    let timeline = match state.postgres.get_interaction_timeline(&query.user_id).await {
        Ok(timeline) => timeline,
        Err(e) => {
            tracing::error!("Failed to fetch interactions for {}: {}", query.user_id, e);
            return store_error_response("Failed to fetch interactions", &e);
        }
    };

    HttpResponse::Ok().json(NetworkStrengthResponse {
        user_id: query.user_id.clone(),
        strength: network_strength(&timeline, Utc::now()),
    })
}
