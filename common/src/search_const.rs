//! Query keys, endpoint paths and display constants for the users search.

pub const KEYWORD_KEY: &str = "q";
pub const SKILLS_KEY: &str = "skills";
pub const DEPARTMENTS_KEY: &str = "departments";
pub const DEPARTMENT_LEGACY_KEY: &str = "department";
pub const JOINED_AFTER_KEY: &str = "joinedAfter";
pub const SORT_KEY: &str = "sort";
pub const FEATURES_KEY: &str = "features";

pub const USERS_PATH: &str = "/api/users";
pub const SKILL_OPTIONS_PATH: &str = "/api/filters/skills";
pub const DEPARTMENT_OPTIONS_PATH: &str = "/api/filters/departments";

pub const SORT_JOINED_DESC: &str = "joined-desc";
pub const SORT_JOINED_ASC: &str = "joined-asc";
/// Order the users endpoint applies when no `sort` is given.
pub const DEFAULT_SORT: &str = SORT_JOINED_DESC;

pub const SORT_OPTIONS: &[(&str, &str)] = &[
    (SORT_JOINED_DESC, "参加日が新しい順"),
    (SORT_JOINED_ASC, "参加日が古い順"),
];

pub const FEATURE_OPTIONS: &[(&str, &str)] = &[
    ("remote", "リモート勤務"),
    ("mentor", "メンター経験"),
    ("leader", "リーダー経験"),
    ("newgrad", "新卒採用枠"),
];

pub const EMPLOYMENT_LABELS: &[(&str, &str)] = &[
    ("full-time", "正社員"),
    ("contract", "契約"),
    ("intern", "インターン"),
];

pub const PROMPT_MESSAGE: &str = "条件を入力して検索してください。";
pub const LOADING_MESSAGE: &str = "検索中...";
pub const EMPTY_RESULTS_MESSAGE: &str = "条件に一致するユーザーが見つかりませんでした。";
pub const ERROR_MESSAGE: &str = "検索に失敗しました。もう一度お試しください。";

pub fn employment_label(value: &str) -> &str {
    EMPLOYMENT_LABELS
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}
