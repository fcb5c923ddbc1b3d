//! Fetch identity for a set of filter criteria.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Order-independent fingerprint of a [`crate::filter_criteria::FilterCriteria`].
///
/// Built by [`crate::filter_codec::FilterCodec::cache_key`]. Two criteria that differ
/// only in the selection order of a multi-value field share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    pub(crate) fn from_parts(parts: Vec<serde_json::Value>) -> Self {
        Self(serde_json::Value::Array(parts).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
