//! Committed filter criteria and the editable draft behind the search form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized search constraints. Read-only once built.
///
/// Multi-value fields never hold an empty sequence and single-value fields never
/// hold an empty string, so equality is field-for-field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    keyword: String,
    multi_value: BTreeMap<String, Vec<String>>,
    single_value: BTreeMap<String, String>,
}

impl FilterCriteria {
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Values of a multi-value field; empty when the field has none.
    pub fn values(&self, field: &str) -> &[String] {
        self.multi_value.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn single(&self, field: &str) -> Option<&str> {
        self.single_value.get(field).map(String::as_str)
    }

    pub(crate) fn from_parts(
        keyword: String,
        multi_value: BTreeMap<String, Vec<String>>,
        single_value: BTreeMap<String, String>,
    ) -> Self {
        let multi_value = multi_value
            .into_iter()
            .map(|(field, values)| (field, values.into_iter().filter(|v| !v.is_empty()).collect::<Vec<_>>()))
            .filter(|(_, values)| !values.is_empty())
            .collect();
        let single_value = single_value.into_iter().filter(|(_, value)| !value.is_empty()).collect();
        Self { keyword, multi_value, single_value }
    }
}

/// In-progress form edits. Never reaches the URL until submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftFilterState {
    keyword: String,
    multi_value: BTreeMap<String, Vec<String>>,
    single_value: BTreeMap<String, Option<String>>,
}

impl DraftFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn values(&self, field: &str) -> &[String] {
        self.multi_value.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn single(&self, field: &str) -> Option<&str> {
        self.single_value.get(field).and_then(|value| value.as_deref())
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    pub fn set_values(&mut self, field: &str, values: Vec<String>) {
        self.multi_value.insert(field.to_string(), values);
    }

    pub fn set_single(&mut self, field: &str, value: Option<String>) {
        self.single_value.insert(field.to_string(), value);
    }

    pub fn toggle_value(&mut self, field: &str, value: &str) {
        let toggled = toggle(self.values(field), value);
        self.set_values(field, toggled);
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.set_keyword(keyword);
        self
    }

    pub fn with_values<I, S>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_values(field, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_single(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set_single(field, Some(value.into()));
        self
    }

    /// Trims the keyword and drops empty sequences and absent or empty values.
    pub fn normalize(&self) -> FilterCriteria {
        let single_value = self
            .single_value
            .iter()
            .filter_map(|(field, value)| value.clone().map(|value| (field.clone(), value)))
            .collect();
        FilterCriteria::from_parts(self.keyword.trim().to_string(), self.multi_value.clone(), single_value)
    }
}

impl From<&FilterCriteria> for DraftFilterState {
    fn from(criteria: &FilterCriteria) -> Self {
        Self {
            keyword: criteria.keyword.clone(),
            multi_value: criteria.multi_value.clone(),
            single_value: criteria
                .single_value
                .iter()
                .map(|(field, value)| (field.clone(), Some(value.clone())))
                .collect(),
        }
    }
}

/// Removes `value` if present, otherwise appends it. Existing order is kept.
pub fn toggle(current: &[String], value: &str) -> Vec<String> {
    let mut next = current.to_vec();
    match next.iter().position(|item| item == value) {
        Some(index) => {
            next.remove(index);
        }
        None => next.push(value.to_string()),
    }
    next
}
