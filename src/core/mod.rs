// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod network;
pub mod scoring;

pub use filters::matches_filters;
pub use matcher::{Matcher, MatchResult};
pub use network::{network_strength, mutual_connections};
pub use scoring::{calculate_compatibility_score, has_strategic_roles};
