//! SIPORT Match - networking matchmaking service for the SIPORT event platform
//!
//! This library scores how well two exhibitor, partner or visitor profiles
//! complement each other and ranks candidate pools for recommendations.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, calculate_compatibility_score, network_strength, mutual_connections};
pub use models::{UserProfile, MatchScore, ScoringWeights, MatchFilters, InteractionType};
