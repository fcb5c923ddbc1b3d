//! Canned users and filter catalogs served by the mock API.

use common::users::{FilterOption, UserRow};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockUser {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub department: &'static str,
    pub employment: &'static str,
    pub joined_at: &'static str,
    pub skills: &'static [&'static str],
    pub features: &'static [&'static str],
}

impl MockUser {
    pub fn to_row(&self) -> UserRow {
        UserRow {
            id: self.id.to_string(),
            name: self.name.to_string(),
            email: self.email.to_string(),
            department: self.department.to_string(),
            employment: self.employment.to_string(),
            joined_at: self.joined_at.to_string(),
        }
    }
}

pub static USERS_FIXTURE: &[MockUser] = &[
    MockUser {
        id: "1",
        name: "山田太郎",
        email: "taro@example.com",
        department: "development",
        employment: "full-time",
        joined_at: "2023-05-10",
        skills: &["frontend", "management"],
        features: &["remote", "mentor"],
    },
    MockUser {
        id: "2",
        name: "鈴木花子",
        email: "hanako@example.com",
        department: "design",
        employment: "contract",
        joined_at: "2022-11-01",
        skills: &["design", "frontend"],
        features: &["remote", "leader"],
    },
    MockUser {
        id: "3",
        name: "佐藤次郎",
        email: "jiro@example.com",
        department: "sales",
        employment: "full-time",
        joined_at: "2021-07-15",
        skills: &["backend", "qa"],
        features: &["newgrad"],
    },
];

const SKILL_CATALOG: &[(&str, &str)] = &[
    ("frontend", "フロントエンド"),
    ("backend", "バックエンド"),
    ("design", "デザイン"),
    ("management", "マネジメント"),
    ("qa", "QA"),
];

const DEPARTMENT_CATALOG: &[(&str, &str)] = &[
    ("sales", "営業"),
    ("development", "開発"),
    ("design", "デザイン"),
    ("hr", "人事"),
];

fn catalog(entries: &[(&str, &str)]) -> Vec<FilterOption> {
    entries.iter().map(|(value, label)| FilterOption::new(*value, *label)).collect()
}

pub fn skill_options() -> Vec<FilterOption> {
    catalog(SKILL_CATALOG)
}

pub fn department_options() -> Vec<FilterOption> {
    catalog(DEPARTMENT_CATALOG)
}
