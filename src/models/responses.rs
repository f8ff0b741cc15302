use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::domain::MatchScore;

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    pub user_id: String,
    pub recommendations: Vec<MatchScore>,
    pub total_candidates: usize,
}

/// Response for the filtered search endpoint
///
/// `total_candidates` counts profiles that passed the filters, before the
/// minimum score cut and the limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResponse {
    pub matches: Vec<MatchScore>,
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Tracked interaction response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInteractionResponse {
    pub success: bool,
    pub interaction_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutualConnectionsResponse {
    pub mutual: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStrengthResponse {
    pub user_id: String,
    pub strength: u32,
}
