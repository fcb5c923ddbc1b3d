use common::{
    filter_codec::map_selected_to_options,
    search_const::{
        DEFAULT_SORT, DEPARTMENTS_KEY, FEATURE_OPTIONS, FEATURES_KEY, JOINED_AFTER_KEY, SKILLS_KEY, SORT_KEY,
        SORT_OPTIONS,
    },
    users::FilterOption,
};
use dioxus::prelude::*;
use dioxus_free_icons::{
    Icon,
    icons::{
        md_action_icons::MdSearch,
        md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank},
    },
};

use crate::components::users_search::UsersSearchContext;

fn feature_options() -> Vec<FilterOption> {
    FEATURE_OPTIONS.iter().map(|(value, label)| FilterOption::new(*value, *label)).collect()
}

#[component]
pub fn UsersFilterForm() -> Element {
    let ctx = use_context::<UsersSearchContext>();
    let coordinator = ctx.coordinator;
    let committed_query = ctx.committed_query;
    let draft_has_changed = use_memo(move || coordinator.read().submit() != *committed_query.read());
    let search_button_color = use_memo(move || if draft_has_changed() { "blue" } else { "#6B7280" });

    rsx! {
        div {
            id: "x-users-filter-form",
            style: "
                display: flex;
                flex-direction: column;
                gap: 18px;
                padding: 16px;
                width: 320px;
                flex-shrink: 0;
                background-color: #F8FCFF;
                border-right: 1px solid rgb(164, 164, 164);
                overflow-y: auto;
            ",
            KeywordInput {}
            FilterSection {
                title: "スキル",
                OptionChecklist { field: SKILLS_KEY, options: ctx.skill_options }
            }
            FilterSection {
                title: "部署",
                OptionChecklist { field: DEPARTMENTS_KEY, options: ctx.department_options }
            }
            FilterSection {
                title: "入社日（以降）",
                JoinedAfterInput {}
            }
            FilterSection {
                title: "並び順",
                SortOrderRadio {}
            }
            FilterSection {
                title: "特徴",
                OptionChecklist { field: FEATURES_KEY, options: feature_options() }
            }
            button {
                id: "x-users-search-button",
                style: "
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    gap: 6px;
                    height: 40px;
                    border-radius: 9999px;
                    border: 2px solid {search_button_color()};
                    background: white;
                    color: {search_button_color()};
                    font-size: 16px;
                    cursor: pointer;
                ",
                onclick: move |_| ctx.submit.call(()),
                Icon { icon: MdSearch, style: "width: 20px; height: 20px;" }
                "検索"
            }
        }
    }
}

#[component]
fn FilterSection(title: String, children: Element) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 6px;",
            div { style: "font-size: 14px; font-weight: 500; color: #1C212D;", "{title}" }
            {children}
        }
    }
}

#[component]
fn KeywordInput() -> Element {
    let ctx = use_context::<UsersSearchContext>();
    let mut coordinator = ctx.coordinator;
    let keyword = use_memo(move || coordinator.read().draft().keyword().to_string());

    rsx! {
        input {
            r#type: "text",
            placeholder: "名前・ID・メールアドレス",
            style: "
                border: 1px solid rgba(101, 101, 101, 0.8);
                border-radius: 9999px;
                padding: 10px 14px;
                font-size: 16px;
                outline: none;
            ",
            value: "{keyword}",
            oninput: move |event: Event<FormData>| {
                coordinator.write().draft_mut().set_keyword(event.value());
            },
            onkeydown: move |event: Event<KeyboardData>| {
                if event.key() == Key::Enter {
                    ctx.submit.call(());
                }
            },
        }
    }
}

/// Checkbox list over a catalog. Selected values missing from the catalog are not shown.
#[component]
fn OptionChecklist(field: &'static str, options: ReadSignal<Vec<FilterOption>>) -> Element {
    let ctx = use_context::<UsersSearchContext>();
    let coordinator = ctx.coordinator;
    let selected_labels = use_memo(move || {
        let coordinator = coordinator.read();
        map_selected_to_options(coordinator.draft().values(field), &options.read())
            .into_iter()
            .map(|option| option.label)
            .collect::<Vec<_>>()
            .join(" / ")
    });

    rsx! {
        if !selected_labels.read().is_empty() {
            div {
                style: "font-size: 12px; color: rgba(28, 33, 45, 0.7);",
                "{selected_labels}"
            }
        }
        ul {
            style: "list-style: none; margin: 0; padding: 0;",
            for option in options.read().iter().cloned() {
                li {
                    key: "{field}-{option.value}",
                    OptionCheckbox { field, option }
                }
            }
        }
    }
}

#[component]
fn OptionCheckbox(field: &'static str, option: FilterOption) -> Element {
    let ctx = use_context::<UsersSearchContext>();
    let mut coordinator = ctx.coordinator;
    let FilterOption { value, label } = option;
    let checked_value = value.clone();
    let is_checked = use_memo(move || coordinator.read().draft().values(field).contains(&checked_value));

    rsx! {
        div {
            class: "x-filter-option",
            style: "
                display: flex;
                flex-direction: row;
                gap: 8px;
                cursor: pointer;
                padding: 2px;
                align-items: center;
            ",
            onclick: move |_| {
                coordinator.write().draft_mut().toggle_value(field, &value);
            },
            if is_checked() {
                Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: black; flex-shrink: 0;" }
            }
            span { style: "font-size: 15px;", "{label}" }
        }
    }
}

#[component]
fn JoinedAfterInput() -> Element {
    let ctx = use_context::<UsersSearchContext>();
    let mut coordinator = ctx.coordinator;
    let joined_after =
        use_memo(move || coordinator.read().draft().single(JOINED_AFTER_KEY).unwrap_or_default().to_string());

    rsx! {
        input {
            r#type: "date",
            style: "padding: 6px; font-size: 15px;",
            value: "{joined_after}",
            oninput: move |event: Event<FormData>| {
                let value = event.value();
                let value = if value.is_empty() { None } else { Some(value) };
                coordinator.write().draft_mut().set_single(JOINED_AFTER_KEY, value);
            },
        }
    }
}

/// An absent sort shows as the server default.
#[component]
fn SortOrderRadio() -> Element {
    let ctx = use_context::<UsersSearchContext>();
    let mut coordinator = ctx.coordinator;
    let current = use_memo(move || coordinator.read().draft().single(SORT_KEY).unwrap_or(DEFAULT_SORT).to_string());

    rsx! {
        for (value, text) in SORT_OPTIONS.iter().copied() {
            label {
                key: "{value}",
                style: "display: flex; gap: 6px; align-items: center; font-size: 15px; cursor: pointer;",
                input {
                    r#type: "radio",
                    name: "x-users-sort-order",
                    value,
                    checked: current() == value,
                    onchange: move |_| {
                        coordinator.write().draft_mut().set_single(SORT_KEY, Some(value.to_string()));
                    },
                }
                "{text}"
            }
        }
    }
}
