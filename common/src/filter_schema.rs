//! Declared filter fields for each search page.

use crate::search_const::{
    DEPARTMENT_LEGACY_KEY, DEPARTMENTS_KEY, FEATURES_KEY, JOINED_AFTER_KEY, KEYWORD_KEY, SKILLS_KEY, SORT_KEY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Every occurrence of the key in order. Duplicates are kept.
    Repeated,
    /// Repeated plural key collapsed to first-seen unique values, followed by a
    /// singular key that is only ever read.
    RepeatedWithLegacy { singular: &'static str },
    /// At most one value. Empty is the same as absent.
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    /// Whether a value in this field alone justifies a search request.
    pub meaningful: bool,
}

impl FieldSpec {
    pub const fn repeated(key: &'static str) -> Self {
        Self { key, kind: FieldKind::Repeated, meaningful: true }
    }

    pub const fn with_legacy(key: &'static str, singular: &'static str) -> Self {
        Self { key, kind: FieldKind::RepeatedWithLegacy { singular }, meaningful: true }
    }

    pub const fn single(key: &'static str, meaningful: bool) -> Self {
        Self { key, kind: FieldKind::Single, meaningful }
    }

    pub fn is_multi(&self) -> bool {
        !matches!(self.kind, FieldKind::Single)
    }
}

/// Keyword key plus the other fields in emission order.
#[derive(Debug, PartialEq, Eq)]
pub struct FilterSchema {
    pub name: &'static str,
    pub keyword_key: &'static str,
    pub fields: &'static [FieldSpec],
}

pub static USERS_SCHEMA: FilterSchema = FilterSchema {
    name: "users",
    keyword_key: KEYWORD_KEY,
    fields: &[
        FieldSpec::repeated(SKILLS_KEY),
        FieldSpec::with_legacy(DEPARTMENTS_KEY, DEPARTMENT_LEGACY_KEY),
        FieldSpec::single(JOINED_AFTER_KEY, true),
        // sort alone never triggers a search
        FieldSpec::single(SORT_KEY, false),
        FieldSpec::repeated(FEATURES_KEY),
    ],
};

impl FilterSchema {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }
}
