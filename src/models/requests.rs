use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{InteractionMetadata, MatchFilters, UserProfile};

/// Request for top-N recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request for a filtered search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(flatten)]
    pub filters: MatchFilters,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Ad-hoc scoring of two supplied profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePairRequest {
    pub anchor: UserProfile,
    pub candidate: UserProfile,
}

/// Request to track an interaction
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrackInteractionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "from_user_id", rename = "fromUserId")]
    pub from_user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "to_user_id", rename = "toUserId")]
    pub to_user_id: String,
    #[serde(rename = "type")]
    pub interaction_type: String,
    #[serde(default)]
    pub metadata: Option<InteractionMetadata>,
}

/// Connection request or like, both of which only name the two users
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserPairRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "from_user_id", rename = "fromUserId")]
    pub from_user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "to_user_id", rename = "toUserId")]
    pub to_user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_matches_request_flattens_filters() {
        let req: FindMatchesRequest = serde_json::from_str(
            r#"{"userId":"u1","industry":"Sport","interests":["AI"],"minScore":40}"#,
        )
        .unwrap();

        assert_eq!(req.filters.industry.as_deref(), Some("Sport"));
        assert_eq!(req.filters.interests, vec!["AI"]);
        assert_eq!(req.filters.min_score, Some(40));
        assert!(req.filters.location.is_none());
        assert!(req.limit.is_none());
    }

    #[test]
    fn test_empty_user_id_rejected() {
        let req = RecommendationsRequest { user_id: String::new(), limit: None };
        assert!(req.validate().is_err());
    }
}
