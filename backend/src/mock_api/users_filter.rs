//! Matching and ordering of fixture users against decoded criteria.

use common::{
    filter_criteria::FilterCriteria,
    search_const::{DEPARTMENTS_KEY, FEATURES_KEY, JOINED_AFTER_KEY, SKILLS_KEY, SORT_JOINED_ASC, SORT_KEY},
};

use crate::mock_api::fixtures::MockUser;

pub fn filter_users<'a>(users: &'a [MockUser], criteria: &FilterCriteria) -> Vec<&'a MockUser> {
    let mut matched = users.iter().filter(|user| matches(user, criteria)).collect::<Vec<_>>();
    if criteria.single(SORT_KEY) == Some(SORT_JOINED_ASC) {
        matched.sort_by(|a, b| a.joined_at.cmp(b.joined_at));
    } else {
        matched.sort_by(|a, b| b.joined_at.cmp(a.joined_at));
    }
    matched
}

fn matches(user: &MockUser, criteria: &FilterCriteria) -> bool {
    matches_keyword(user, criteria.keyword())
        && contains_all(user.skills, criteria.values(SKILLS_KEY))
        && matches_department(user, criteria.values(DEPARTMENTS_KEY))
        && criteria.single(JOINED_AFTER_KEY).is_none_or(|after| user.joined_at >= after)
        && contains_all(user.features, criteria.values(FEATURES_KEY))
}

fn matches_keyword(user: &MockUser, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    user.name.contains(keyword)
        || user.id.contains(keyword)
        || user.email.to_lowercase().contains(&keyword.to_lowercase())
}

fn matches_department(user: &MockUser, departments: &[String]) -> bool {
    departments.is_empty() || departments.iter().any(|department| department == user.department)
}

fn contains_all(present: &[&str], requested: &[String]) -> bool {
    requested.iter().all(|value| present.contains(&value.as_str()))
}
