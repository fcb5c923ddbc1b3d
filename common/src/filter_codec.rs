//! Conversion between [`QueryState`] and [`FilterCriteria`].

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    cache_key::CacheKey,
    filter_criteria::{DraftFilterState, FilterCriteria},
    filter_schema::{FieldKind, FilterSchema, USERS_SCHEMA},
    query_state::QueryState,
};

/// Pure, synchronous codec bound to one declared field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCodec {
    schema: &'static FilterSchema,
}

impl FilterCodec {
    pub const fn new(schema: &'static FilterSchema) -> Self {
        Self { schema }
    }

    pub const fn users() -> Self {
        Self::new(&USERS_SCHEMA)
    }

    pub fn schema(&self) -> &'static FilterSchema {
        self.schema
    }

    /// Unknown keys are ignored and no value is validated.
    pub fn decode(&self, query: &QueryState) -> FilterCriteria {
        let keyword = query.get(self.schema.keyword_key).map(str::trim).unwrap_or("").to_string();
        let mut multi_value = BTreeMap::new();
        let mut single_value = BTreeMap::new();

        for field in self.schema.fields {
            match field.kind {
                FieldKind::Repeated => {
                    let values = query.get_all(field.key).map(str::to_string).collect::<Vec<_>>();
                    multi_value.insert(field.key.to_string(), values);
                }
                FieldKind::RepeatedWithLegacy { singular } => {
                    let mut values: Vec<String> = Vec::new();
                    for value in query.get_all(field.key) {
                        if !values.iter().any(|seen| seen == value) {
                            values.push(value.to_string());
                        }
                    }
                    if let Some(fallback) = query.get(singular).filter(|v| !v.is_empty()) {
                        if !values.iter().any(|seen| seen == fallback) {
                            values.push(fallback.to_string());
                        }
                    }
                    multi_value.insert(field.key.to_string(), values);
                }
                FieldKind::Single => {
                    if let Some(value) = query.get(field.key) {
                        single_value.insert(field.key.to_string(), value.to_string());
                    }
                }
            }
        }

        FilterCriteria::from_parts(keyword, multi_value, single_value)
    }

    /// Emits only non-empty fields: keyword first, then the schema order.
    /// Multi-value fields use the plural key once per element; the legacy
    /// singular key is never written.
    pub fn encode(&self, criteria: &FilterCriteria) -> QueryState {
        let mut query = QueryState::new();
        let keyword = criteria.keyword().trim();
        if !keyword.is_empty() {
            query.append(self.schema.keyword_key, keyword);
        }
        for field in self.schema.fields {
            if field.is_multi() {
                for value in criteria.values(field.key) {
                    query.append(field.key, value.as_str());
                }
            } else if let Some(value) = criteria.single(field.key) {
                query.append(field.key, value);
            }
        }
        query
    }

    pub fn encode_draft(&self, draft: &DraftFilterState) -> QueryState {
        self.encode(&draft.normalize())
    }

    /// True when the keyword or any field marked meaningful carries a value.
    pub fn is_meaningful(&self, criteria: &FilterCriteria) -> bool {
        if !criteria.keyword().is_empty() {
            return true;
        }
        self.schema.fields.iter().filter(|field| field.meaningful).any(|field| {
            if field.is_multi() {
                !criteria.values(field.key).is_empty()
            } else {
                criteria.single(field.key).is_some()
            }
        })
    }

    /// Multi-value members are sorted before fingerprinting, so selection order
    /// does not change fetch identity even though [`Self::encode`] keeps it.
    pub fn cache_key(&self, criteria: &FilterCriteria) -> CacheKey {
        let mut parts = vec![
            Value::String(self.schema.name.to_string()),
            Value::String(criteria.keyword().to_string()),
        ];
        for field in self.schema.fields {
            if field.is_multi() {
                let mut members = criteria.values(field.key).to_vec();
                members.sort();
                parts.push(Value::Array(members.into_iter().map(Value::String).collect()));
            } else {
                parts.push(Value::String(criteria.single(field.key).unwrap_or("").to_string()));
            }
        }
        CacheKey::from_parts(parts)
    }
}

/// Catalog entries that can be matched against persisted selection values.
pub trait OptionValue {
    fn option_value(&self) -> &str;
}

/// Looks up each selected value in the catalog, in selection order. Values with
/// no catalog entry are dropped.
pub fn map_selected_to_options<T: OptionValue + Clone>(selected: &[String], catalog: &[T]) -> Vec<T> {
    selected
        .iter()
        .filter_map(|value| catalog.iter().find(|option| option.option_value() == value))
        .cloned()
        .collect()
}
