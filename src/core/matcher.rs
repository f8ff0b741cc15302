use std::collections::HashSet;

use crate::models::{MatchFilters, MatchScore, ScoringWeights, UserProfile};
use crate::core::{
    filters::matches_filters,
    scoring::calculate_compatibility_score,
};

/// Result of a ranking pass
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<MatchScore>,
    pub total_candidates: usize,
}

/// Ranks candidate profiles against an anchor profile
///
/// # Pipeline Stages
/// 1. Exclusion / filter pre-pass
/// 2. Compatibility scoring
/// 3. Stable descending sort (ties keep pool order)
/// 4. Truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single candidate against the anchor
    pub fn score(&self, anchor: &UserProfile, candidate: &UserProfile) -> MatchScore {
        calculate_compatibility_score(anchor, candidate, &self.weights)
    }

    /// Recommend the best `limit` candidates for the anchor
    ///
    /// # Arguments
    /// * `anchor` - The profile recommendations are computed for
    /// * `candidates` - Candidate pool, usually every other profile
    /// * `exclude_ids` - Users to leave out, e.g. already contacted
    /// * `limit` - Maximum number of results
    ///
    /// # Returns
    /// MatchResult with at most `min(limit, remaining pool)` entries
    pub fn recommend(
        &self,
        anchor: &UserProfile,
        candidates: &[UserProfile],
        exclude_ids: &HashSet<String>,
        limit: usize,
    ) -> MatchResult {
        let mut scored: Vec<MatchScore> = candidates
            .iter()
            .filter(|profile| !exclude_ids.contains(&profile.user_id))
            .map(|profile| self.score(anchor, profile))
            .collect();
        let total_candidates = scored.len();

        sort_by_score(&mut scored);
        scored.truncate(limit);

        MatchResult {
            matches: scored,
            total_candidates,
        }
    }

    /// Score every candidate passing the filters, best first
    pub fn find_matches(
        &self,
        anchor: &UserProfile,
        candidates: &[UserProfile],
        filters: &MatchFilters,
    ) -> MatchResult {
        let mut total_candidates = 0;
        let min_score = filters.min_score.unwrap_or(0);

        let mut scored: Vec<MatchScore> = candidates
            .iter()
            .filter(|profile| matches_filters(profile, filters))
            .inspect(|_| total_candidates += 1)
            .map(|profile| self.score(anchor, profile))
            .filter(|m| m.score >= min_score)
            .collect();

        sort_by_score(&mut scored);

        MatchResult {
            matches: scored,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

// `sort_by` is stable, so equal scores keep their pool order
fn sort_by_score(matches: &mut [MatchScore]) {
    matches.sort_by(|a, b| b.score.cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candidate(id: &str, industry: &str, interests: &[&str]) -> UserProfile {
        UserProfile {
            user_id: id.to_string(),
            industry: industry.to_string(),
            location: "Casablanca".to_string(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn create_anchor() -> UserProfile {
        UserProfile {
            user_id: "anchor".to_string(),
            role: "CEO".to_string(),
            industry: "Logistique".to_string(),
            location: "Tanger".to_string(),
            interests: vec!["Ports".to_string(), "IoT".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_recommend_sorted_and_limited() {
        let matcher = Matcher::with_default_weights();
        let anchor = create_anchor();

        let candidates = vec![
            create_candidate("1", "Santé", &[]),                  // 0
            create_candidate("2", "Logistique", &["Ports"]),      // 35
            create_candidate("3", "Logistique", &[]),             // 25
            create_candidate("4", "Santé", &["Ports", "IoT"]),    // 20
        ];

        let result = matcher.recommend(&anchor, &candidates, &HashSet::new(), 3);

        let ids: Vec<&str> = result.matches.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
        assert_eq!(result.total_candidates, 4);
    }

    #[test]
    fn test_recommend_respects_exclusions() {
        let matcher = Matcher::with_default_weights();
        let anchor = create_anchor();
        let candidates = vec![
            create_candidate("1", "Logistique", &[]),
            create_candidate("2", "Logistique", &[]),
        ];
        let exclude: HashSet<String> = ["1".to_string()].into_iter().collect();

        let result = matcher.recommend(&anchor, &candidates, &exclude, 10);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].user_id, "2");
    }

    #[test]
    fn test_recommend_ties_keep_pool_order() {
        let matcher = Matcher::with_default_weights();
        let anchor = create_anchor();
        let candidates: Vec<UserProfile> = ["c", "a", "b"]
            .iter()
            .map(|id| create_candidate(id, "Logistique", &[]))
            .collect();

        let result = matcher.recommend(&anchor, &candidates, &HashSet::new(), 10);

        let ids: Vec<&str> = result.matches.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_recommend_empty_pool() {
        let matcher = Matcher::default();
        let result = matcher.recommend(&create_anchor(), &[], &HashSet::new(), 5);

        assert!(result.matches.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[test]
    fn test_find_matches_min_score() {
        let matcher = Matcher::with_default_weights();
        let anchor = create_anchor();
        let candidates = vec![
            create_candidate("1", "Logistique", &["Ports"]),
            create_candidate("2", "Santé", &["Ports"]),
        ];
        let filters = MatchFilters {
            min_score: Some(30),
            ..Default::default()
        };

        let result = matcher.find_matches(&anchor, &candidates, &filters);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].user_id, "1");
        assert_eq!(result.total_candidates, 2);
    }

    #[test]
    fn test_find_matches_interest_filter() {
        let matcher = Matcher::with_default_weights();
        let anchor = create_anchor();
        let candidates = vec![
            create_candidate("1", "Santé", &["Blockchain"]),
            create_candidate("2", "Santé", &["Cuisine"]),
        ];
        let filters = MatchFilters {
            interests: vec!["Blockchain".to_string(), "AI".to_string()],
            ..Default::default()
        };

        let result = matcher.find_matches(&anchor, &candidates, &filters);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].user_id, "1");
        assert_eq!(result.matches[0].score, 0);
    }
}
