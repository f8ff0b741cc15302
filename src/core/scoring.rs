use crate::models::{MatchScore, ScoringWeights, UserProfile};

/// Role pairs that benefit from connecting, checked in order in both directions
pub const STRATEGIC_ROLE_PAIRS: [(&str, &str); 4] = [
    ("CEO", "Investisseur"),
    ("Marketing", "Communication"),
    ("Développeur", "Product Manager"),
    ("Designer", "Développeur"),
];

/// Upper bound of any compatibility score
pub const MAX_SCORE: u32 = 100;

/// Number of tokens quoted in a reason string
const REASON_PREVIEW: usize = 3;

/// Calculate the compatibility (0-100) of `candidate` for `anchor`
///
/// Scoring formula, evaluated in order:
/// score = (
///     shared_interests * 10 (max 30) +       # topics both declare
///     industry_bonus 25 +                    # identical industry
///     complementary_skills * 8 (max 25) +    # needs met by the other's offering, both ways
///     location_bonus 10 +                    # identical, non-empty location
///     role_bonus 10                          # first strategic role pair found
/// )
///
/// Each dimension that fires appends one entry to `reasons`, in the same order.
/// The complementary and role terms are checked both ways, so swapping the
/// arguments keeps the score. Only `user_id` and the order of
/// `complementary_skills` change.
pub fn calculate_compatibility_score(
    anchor: &UserProfile,
    candidate: &UserProfile,
    weights: &ScoringWeights,
) -> MatchScore {
    let mut reasons = Vec::new();

    // Stage 1: Shared interests
    let shared_interests = intersect(&anchor.interests, &candidate.interests);
    let interest_score = capped(
        shared_interests.len(),
        weights.per_shared_interest,
        weights.shared_interests_cap,
    );
    if !shared_interests.is_empty() {
        reasons.push(format!(
            "{} intérêt(s) commun(s): {}",
            shared_interests.len(),
            preview(&shared_interests)
        ));
    }

    // Stage 2: Industry
    let industry_match = anchor.industry == candidate.industry;
    let industry_score = if industry_match {
        reasons.push(format!("Même secteur d'activité: {}", anchor.industry));
        weights.industry
    } else {
        0
    };

    // Stage 3: Complementary skills (what each side seeks vs what the other offers)
    let mut complementary_skills = intersect(&anchor.looking_for, &candidate.offering);
    complementary_skills.extend(intersect(&candidate.looking_for, &anchor.offering));
    let complementary_score = capped(
        complementary_skills.len(),
        weights.per_complementary_skill,
        weights.complementary_cap,
    );
    if !complementary_skills.is_empty() {
        reasons.push(format!(
            "Compétences complémentaires: {}",
            preview(&complementary_skills)
        ));
    }

    // Stage 4: Geographic proximity
    let location_score = if !anchor.location.is_empty() && anchor.location == candidate.location {
        reasons.push(format!("Même localisation: {}", anchor.location));
        weights.location
    } else {
        0
    };

    // Stage 5: Role complementarity
    let role_score = if has_strategic_roles(&anchor.role, &candidate.role) {
        reasons.push("Rôles stratégiquement complémentaires".to_string());
        weights.role
    } else {
        0
    };

    let total = interest_score + industry_score + complementary_score + location_score + role_score;

    MatchScore {
        user_id: candidate.user_id.clone(),
        score: total.min(MAX_SCORE),
        reasons,
        shared_interests,
        complementary_skills,
        industry_match,
    }
}

/// Check whether two roles form one of the strategic pairs, in either direction
pub fn has_strategic_roles(role_a: &str, role_b: &str) -> bool {
    STRATEGIC_ROLE_PAIRS.iter().any(|(first, second)| {
        (role_a.contains(first) && role_b.contains(second))
            || (role_a.contains(second) && role_b.contains(first))
    })
}

/// Tokens of `left` also present in `right`, in `left` order
#[inline]
fn intersect(left: &[String], right: &[String]) -> Vec<String> {
    left.iter()
        .filter(|token| right.contains(token))
        .cloned()
        .collect()
}

#[inline]
fn capped(count: usize, per_item: u32, cap: u32) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    count.saturating_mul(per_item).min(cap)
}

fn preview(tokens: &[String]) -> String {
    tokens
        .iter()
        .take(REASON_PREVIEW)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn create_test_profile(id: &str, role: &str, industry: &str, location: &str) -> UserProfile {
        UserProfile {
            user_id: id.to_string(),
            company: "Test Corp".to_string(),
            role: role.to_string(),
            industry: industry.to_string(),
            location: location.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_example() {
        let mut anchor = create_test_profile("anchor", "CEO", "Sport", "Paris");
        anchor.interests = tokens(&["AI", "IoT"]);
        anchor.looking_for = tokens(&["Funding"]);

        let mut candidate = create_test_profile("candidate", "Investisseur", "Sport", "Paris");
        candidate.interests = tokens(&["AI", "Blockchain"]);
        candidate.offering = tokens(&["Funding"]);

        let result = calculate_compatibility_score(&anchor, &candidate, &ScoringWeights::default());

        assert_eq!(result.score, 63);
        assert_eq!(result.user_id, "candidate");
        assert_eq!(result.shared_interests, vec!["AI"]);
        assert_eq!(result.complementary_skills, vec!["Funding"]);
        assert!(result.industry_match);
        assert_eq!(
            result.reasons,
            vec![
                "1 intérêt(s) commun(s): AI".to_string(),
                "Même secteur d'activité: Sport".to_string(),
                "Compétences complémentaires: Funding".to_string(),
                "Même localisation: Paris".to_string(),
                "Rôles stratégiquement complémentaires".to_string(),
            ]
        );
    }

    #[test]
    fn test_disjoint_profiles_score_zero() {
        let mut a = create_test_profile("a", "Chef", "Sport", "Paris");
        a.interests = tokens(&["AI"]);
        let mut b = create_test_profile("b", "Comptable", "Santé", "Lyon");
        b.interests = tokens(&["Cuisine"]);

        let result = calculate_compatibility_score(&a, &b, &ScoringWeights::default());

        assert_eq!(result.score, 0);
        assert!(result.reasons.is_empty());
        assert!(result.shared_interests.is_empty());
        assert!(result.complementary_skills.is_empty());
        assert!(!result.industry_match);
    }

    #[test]
    fn test_interest_preview_lists_three() {
        let mut a = create_test_profile("a", "", "X", "");
        a.interests = tokens(&["A", "B", "C", "D"]);
        let mut b = create_test_profile("b", "", "Y", "");
        b.interests = tokens(&["D", "C", "B", "A"]);

        let result = calculate_compatibility_score(&a, &b, &ScoringWeights::default());

        assert_eq!(result.score, 30);
        assert_eq!(result.shared_interests, tokens(&["A", "B", "C", "D"]));
        assert_eq!(result.reasons, vec!["4 intérêt(s) commun(s): A, B, C".to_string()]);
    }

    #[test]
    fn test_complementary_skills_not_deduplicated() {
        let mut a = create_test_profile("a", "", "X", "");
        a.looking_for = tokens(&["Design"]);
        a.offering = tokens(&["Design"]);
        let mut b = create_test_profile("b", "", "Y", "");
        b.looking_for = tokens(&["Design"]);
        b.offering = tokens(&["Design"]);

        let result = calculate_compatibility_score(&a, &b, &ScoringWeights::default());

        assert_eq!(result.complementary_skills, tokens(&["Design", "Design"]));
        assert_eq!(result.score, 16);
    }

    #[test]
    fn test_empty_location_never_matches() {
        let a = create_test_profile("a", "", "X", "");
        let b = create_test_profile("b", "", "Y", "");

        let result = calculate_compatibility_score(&a, &b, &ScoringWeights::default());

        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_empty_industries_match_literally() {
        let a = create_test_profile("a", "", "", "");
        let b = create_test_profile("b", "", "", "");

        let result = calculate_compatibility_score(&a, &b, &ScoringWeights::default());

        assert!(result.industry_match);
        assert_eq!(result.score, 25);
    }

    #[test]
    fn test_role_pairs_symmetric_and_substring() {
        assert!(has_strategic_roles("CEO & Fondateur", "Investisseur Senior"));
        assert!(has_strategic_roles("Investisseur", "CEO"));
        assert!(has_strategic_roles("Lead Développeur", "Designer UX"));
        assert!(!has_strategic_roles("CEO", "CEO"));
        assert!(!has_strategic_roles("ceo", "investisseur"));
    }

    #[test]
    fn test_role_bonus_awarded_once() {
        // Matches both the Développeur/Product Manager and Designer/Développeur pairs
        let a = create_test_profile("a", "Designer Développeur", "X", "");
        let b = create_test_profile("b", "Développeur Product Manager", "Y", "");

        let result = calculate_compatibility_score(&a, &b, &ScoringWeights::default());

        assert_eq!(result.score, 10);
        assert_eq!(result.reasons.len(), 1);
    }

    #[test]
    fn test_custom_weights_are_clamped() {
        let weights = ScoringWeights {
            industry: 90,
            location: 90,
            ..ScoringWeights::default()
        };
        let a = create_test_profile("a", "", "Sport", "Paris");
        let b = create_test_profile("b", "", "Sport", "Paris");

        let result = calculate_compatibility_score(&a, &b, &weights);

        assert_eq!(result.score, MAX_SCORE);
    }
}
