use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::models::InteractionType;

/// Window within which an interaction counts as recent
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Multiplier applied to recent interactions
const RECENCY_BOOST: f64 = 1.5;

/// Upper bound of the network strength score
pub const MAX_NETWORK_STRENGTH: u32 = 100;

/// Calculate a user's network strength (0-100) from their outgoing interactions
///
/// Each interaction contributes its type weight, boosted by 1.5 when younger
/// than 30 days. The sum is scaled down by 10 and rounded.
///
/// # Arguments
/// * `interactions` - `(type, timestamp)` pairs sent by the user
/// * `now` - Reference instant for recency
pub fn network_strength(
    interactions: &[(InteractionType, DateTime<Utc>)],
    now: DateTime<Utc>,
) -> u32 {
    let window = Duration::days(RECENT_WINDOW_DAYS);

    let total: f64 = interactions
        .iter()
        .map(|(interaction_type, timestamp)| {
            let boost = if now - *timestamp < window { RECENCY_BOOST } else { 1.0 };
            interaction_type.network_weight() * boost
        })
        .sum();

    let scaled = (total / 10.0).round();
    if scaled >= MAX_NETWORK_STRENGTH as f64 {
        MAX_NETWORK_STRENGTH
    } else {
        scaled.max(0.0) as u32
    }
}

/// Users connected to both sides, in first-seen order of `first`
pub fn mutual_connections(first: &[String], second: &[String]) -> Vec<String> {
    let second: HashSet<&str> = second.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    first
        .iter()
        .filter(|id| second.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect()
}
