use common::{
    search_const::{ERROR_MESSAGE, employment_label},
    search_coordinator::ResultsPane,
    users::{FilterOption, UserRow},
};
use dioxus::prelude::*;

use crate::components::{
    error_boundary::ComponentErrorDisplay, suspend_boundary::LoadingIndicator, users_search::UsersSearchContext,
};

fn department_label(options: &[FilterOption], department: &str) -> String {
    options
        .iter()
        .find(|option| option.value == department)
        .map(|option| option.label.clone())
        .unwrap_or_else(|| department.to_string())
}

#[component]
pub fn UsersResultsPane() -> Element {
    let ctx = use_context::<UsersSearchContext>();
    let pane = use_memo(move || ctx.coordinator.read().pane().clone());

    let content = match pane() {
        ResultsPane::Loading => rsx! { LoadingIndicator {} },
        ResultsPane::Error { reason, retry_eligible, previous_rows } => rsx! {
            ComponentErrorDisplay {
                error_txt: reason,
                p { style: "color: darkred; font-size: 18px;", "{ERROR_MESSAGE}" }
                if retry_eligible {
                    button {
                        style: "color:blue; font-size: 20px; border: 1px solid blue; padding: 8px; border-radius: 5px; margin: 10px;",
                        onclick: move |_| ctx.retry.call(()),
                        "再試行"
                    }
                }
            }
            if !previous_rows.is_empty() {
                UsersTable { rows: previous_rows }
            }
        },
        ResultsPane::Success(rows) if !rows.is_empty() => rsx! { UsersTable { rows } },
        other => rsx! {
            div {
                style: "font-size: 20px; color: rgba(28, 33, 45, 0.8); padding: 24px;",
                "{other.message().unwrap_or_default()}"
            }
        },
    };

    rsx! {
        div {
            id: "x-users-results-pane",
            style: "
                flex-grow: 1;
                min-width: 400px;
                height: 100%;
                overflow-y: auto;
                background-color: #ECEEF2;
                padding: 16px;
                box-sizing: border-box;
            ",
            {content}
        }
    }
}

#[component]
fn UsersTable(rows: ReadSignal<Vec<UserRow>>) -> Element {
    let ctx = use_context::<UsersSearchContext>();
    let department_options = ctx.department_options;

    rsx! {
        table {
            style: "width: 100%; border-collapse: collapse; background: white; font-size: 15px;",
            thead {
                tr {
                    th { style: "text-align: left; padding: 8px;", "名前" }
                    th { style: "text-align: left; padding: 8px;", "メールアドレス" }
                    th { style: "text-align: left; padding: 8px;", "部署" }
                    th { style: "text-align: left; padding: 8px;", "雇用形態" }
                    th { style: "text-align: left; padding: 8px;", "入社日" }
                }
            }
            tbody {
                for row in rows.read().iter().cloned() {
                    tr {
                        key: "{row.id}",
                        style: "border-top: 1px solid #E5E7EB;",
                        td { style: "padding: 8px;", "{row.name}" }
                        td { style: "padding: 8px;", "{row.email}" }
                        td { style: "padding: 8px;", "{department_label(&department_options.read(), &row.department)}" }
                        td { style: "padding: 8px;", "{employment_label(&row.employment)}" }
                        td { style: "padding: 8px;", "{row.joined_at}" }
                    }
                }
            }
        }
    }
}
