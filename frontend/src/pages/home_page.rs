use common::{filter_codec::FilterCodec, filter_criteria::DraftFilterState, query_state::QueryState};
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdSearch;
use dioxus_free_icons::Icon;

use crate::routes::Route;

/// Home page
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "ユーザー検索 - ホーム" }
        div {
            id: "x-home-container",
            style: "
                display:flex;
                flex-direction: column;
                gap: 20px;
                width: 100%;
                height: 100%;
                padding: 36px 40px;
                background: #F5F6F8;
                box-sizing: border-box;
                overflow: auto;
            ",

            div {
                style: "
                    color: #0F172A;
                    font-size: 40px;
                    font-weight: 500;
                    letter-spacing: -0.02em;
                ",
                "社員ディレクトリ"
            }
            UserSearchCard {}
        }
    }
}

#[component]
fn UserSearchCard() -> Element {
    rsx! {
        div {
            id: "x-card-user-search",
            style: "
                display:flex;
                flex-direction: column;
                gap: 14px;
                width: 520px;
                border-radius: 22px;
                padding: 22px 22px 26px 22px;
                background: linear-gradient(135deg, #2D208A 0%, #5B3DF5 100%);
                color: white;
                box-shadow: 0 8px 24px rgba(0,0,0,0.12);
            ",
            div { style: "font-size: 28px; font-weight: 500;", "ユーザー検索" }
            div {
                style: "font-size: 18px; line-height: 1.5; color: rgba(255,255,255,0.92);",
                "名前・ID・メールアドレスで検索し、スキルや部署、入社日で絞り込めます。"
            }
            KeywordShortcutInput {}
            Link {
                to: Route::users_search(QueryState::new()),
                style: "color: white; font-size: 15px;",
                "詳細な条件で検索する"
            }
        }
    }
}

/// Enter jumps straight to the search page with the typed keyword committed.
#[component]
fn KeywordShortcutInput() -> Element {
    let mut keyword = use_signal(String::new);
    rsx! {
        div {
            style: "
                display:flex;
                align-items:center;
                gap: 10px;
                background-color: white;
                border-radius: 9999px;
                padding: 10px 14px;
                height: 42px;
                color: #111827;
            ",
            Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:#6B7280;" }
            input {
                r#type: "text",
                placeholder: "キーワードを入力",
                style: "
                    flex:1;
                    border: none;
                    outline: none;
                    background: transparent;
                    color: #111827;
                    font-size: 14px;
                ",
                value: "{keyword}",
                oninput: move |e| {
                    keyword.set(e.value());
                },
                onkeypress: move |e| {
                    if e.key() == Key::Enter {
                        e.prevent_default();
                        let draft = DraftFilterState::new().with_keyword(keyword.read().clone());
                        navigator().push(Route::users_search(FilterCodec::users().encode_draft(&draft)));
                    }
                },
            }
        }
    }
}
