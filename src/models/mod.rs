// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{UserProfile, MatchScore, ScoringWeights, MatchFilters, InteractionType, InteractionMetadata, ConnectionStatus, NetworkingInteraction};
pub use requests::{RecommendationsRequest, FindMatchesRequest, ScorePairRequest, TrackInteractionRequest, UserPairRequest};
pub use responses::{RecommendationsResponse, FindMatchesResponse, HealthResponse, ErrorResponse, TrackInteractionResponse, MutualConnectionsResponse, NetworkStrengthResponse};
