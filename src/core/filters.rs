use crate::models::{MatchFilters, UserProfile};

/// Check if a profile passes the filtered-search constraints
///
/// Unset filters accept everything; `interests` accepts a profile declaring
/// at least one of the listed tokens.
#[inline]
pub fn matches_filters(profile: &UserProfile, filters: &MatchFilters) -> bool {
    if let Some(industry) = non_empty(&filters.industry) {
        if profile.industry != industry {
            return false;
        }
    }

    if let Some(location) = non_empty(&filters.location) {
        if profile.location != location {
            return false;
        }
    }

    if !filters.interests.is_empty()
        && !filters.interests.iter().any(|interest| profile.interests.contains(interest)) {
        return false;
    }

    true
}

// Empty strings coming from form inputs mean "no filter"
#[inline]
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile() -> UserProfile {
        UserProfile {
            user_id: "test_user".to_string(),
            industry: "Maritime".to_string(),
            location: "Casablanca".to_string(),
            interests: vec!["Ports".to_string(), "Énergie".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_no_filters_accept() {
        assert!(matches_filters(&create_test_profile(), &MatchFilters::default()));
    }

    #[test]
    fn test_industry_filter() {
        let profile = create_test_profile();
        let mut filters = MatchFilters {
            industry: Some("Maritime".to_string()),
            ..Default::default()
        };
        assert!(matches_filters(&profile, &filters));

        filters.industry = Some("Santé".to_string());
        assert!(!matches_filters(&profile, &filters));
    }

    #[test]
    fn test_location_filter() {
        let filters = MatchFilters {
            location: Some("Rabat".to_string()),
            ..Default::default()
        };
        assert!(!matches_filters(&create_test_profile(), &filters));
    }

    #[test]
    fn test_empty_filter_values_ignored() {
        let filters = MatchFilters {
            industry: Some(String::new()),
            location: Some(String::new()),
            ..Default::default()
        };
        assert!(matches_filters(&create_test_profile(), &filters));
    }

    #[test]
    fn test_interest_filter_any_of() {
        let profile = create_test_profile();
        let filters = MatchFilters {
            interests: vec!["AI".to_string(), "Ports".to_string()],
            ..Default::default()
        };
        assert!(matches_filters(&profile, &filters));

        let filters = MatchFilters {
            interests: vec!["AI".to_string()],
            ..Default::default()
        };
        assert!(!matches_filters(&profile, &filters));
    }
}
