//! Wire models of the users API and its filter-option catalogs.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    filter_codec::OptionValue,
    search_const::{DEPARTMENT_OPTIONS_PATH, SKILL_OPTIONS_PATH},
    ttl_cache::CachePolicy,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub employment: String,
    pub joined_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

impl OptionValue for FilterOption {
    fn option_value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
    pub items: Vec<FilterOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterCatalogKind {
    Skills,
    Departments,
}

impl FilterCatalogKind {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Skills => SKILL_OPTIONS_PATH,
            Self::Departments => DEPARTMENT_OPTIONS_PATH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Departments => "departments",
        }
    }
}

impl Display for FilterCatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCatalogKind(pub String);

impl Display for UnknownCatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown filter catalog: {}", self.0)
    }
}

impl FromStr for FilterCatalogKind {
    type Err = UnknownCatalogKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skills" => Ok(Self::Skills),
            "departments" => Ok(Self::Departments),
            other => Err(UnknownCatalogKind(other.to_string())),
        }
    }
}

/// Client-side results cache settings, resolved from the server environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySettings {
    pub stale_time_ms: u64,
    pub max_entries: usize,
}

impl QuerySettings {
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy { ttl_ms: self.stale_time_ms, max_entries: self.max_entries }
    }
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self { stale_time_ms: 30_000, max_entries: 128 }
    }
}
