use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Networking profile of an exhibitor, partner or visitor
///
/// Set-valued fields hold case-sensitive tokens; callers canonicalize upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "lookingFor", default)]
    pub looking_for: Vec<String>,
    #[serde(default)]
    pub offering: Vec<String>,
}

/// Compatibility of a candidate profile with an anchor profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub score: u32,
    pub reasons: Vec<String>,
    #[serde(rename = "sharedInterests")]
    pub shared_interests: Vec<String>,
    #[serde(rename = "complementarySkills")]
    pub complementary_skills: Vec<String>,
    #[serde(rename = "industryMatch")]
    pub industry_match: bool,
}

/// Points awarded by each compatibility dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub per_shared_interest: u32,
    pub shared_interests_cap: u32,
    pub industry: u32,
    pub per_complementary_skill: u32,
    pub complementary_cap: u32,
    pub location: u32,
    pub role: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            per_shared_interest: 10,
            shared_interests_cap: 30,
            industry: 25,
            per_complementary_skill: 8,
            complementary_cap: 25,
            location: 10,
            role: 10,
        }
    }
}

/// Optional narrowing applied before scoring in a filtered search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchFilters {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "minScore", default)]
    pub min_score: Option<u32>,
}

/// Kind of interaction between two users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "interaction_type", rename_all = "lowercase")]
pub enum InteractionType {
    View,
    Like,
    Message,
    Meeting,
    Connection,
}

impl InteractionType {
    /// Boost stored on the pair record when this interaction is tracked
    pub fn score_boost(self) -> i32 {
        match self {
            InteractionType::View => 1,
            InteractionType::Like => 5,
            InteractionType::Message => 10,
            InteractionType::Meeting => 20,
            InteractionType::Connection => 30,
        }
    }

    /// Weight of this interaction in the network strength aggregate
    pub fn network_weight(self) -> f64 {
        match self {
            InteractionType::View => 1.0,
            InteractionType::Like => 2.0,
            InteractionType::Message => 5.0,
            InteractionType::Meeting => 10.0,
            InteractionType::Connection => 15.0,
        }
    }
}

impl std::str::FromStr for InteractionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(InteractionType::View),
            "like" => Ok(InteractionType::Like),
            "message" => Ok(InteractionType::Message),
            "meeting" => Ok(InteractionType::Meeting),
            "connection" => Ok(InteractionType::Connection),
            other => Err(format!(
                "Unknown interaction type '{}', expected one of: view, like, message, meeting, connection",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Declined,
}

/// Structured payload attached to an interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionMetadata {
    ConnectionRequest {
        status: ConnectionStatus,
        #[serde(rename = "requestedAt")]
        requested_at: DateTime<Utc>,
    },
    Like {
        #[serde(rename = "likedAt")]
        liked_at: DateTime<Utc>,
    },
    Note {
        text: String,
    },
}

/// A tracked interaction from one user towards another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkingInteraction {
    pub id: Uuid,
    #[serde(rename = "fromUserId")]
    pub from_user_id: String,
    #[serde(rename = "toUserId")]
    pub to_user_id: String,
    #[serde(rename = "type")]
    pub interaction_type: InteractionType,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Option<InteractionMetadata>,
    #[serde(rename = "toUser", default, skip_serializing_if = "Option::is_none")]
    pub to_user: Option<UserProfile>,
}

impl NetworkingInteraction {
    pub fn new(
        from_user_id: impl Into<String>,
        to_user_id: impl Into<String>,
        interaction_type: InteractionType,
        metadata: Option<InteractionMetadata>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_user_id: from_user_id.into(),
            to_user_id: to_user_id.into(),
            interaction_type,
            timestamp: Utc::now(),
            metadata,
            to_user: None,
        }
    }
}
