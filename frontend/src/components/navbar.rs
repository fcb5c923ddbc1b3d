//! Top navigation bar component.

use common::query_state::QueryState;
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::{MdHome, MdSearch};
use dioxus_free_icons::{Icon, IconShape};

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::routes::Route;

/// Shared navbar component.
#[component]
pub fn Navbar() -> Element {
    rsx! {
        div {
            id: "x-nav-container",
            style: "
                display:flex;
                flex-direction: column;
                width: 100%;
                height: 100%;
            ",

            div {
                id: "x-nav-topbar",
                style: "
                    display:flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 24px;
                    height: 52px;
                    flex-shrink: 0;
                    padding: 0 16px;
                    background-color: #1C212D;
                ",
                IconLink { to: Route::HomePage {}, icon: MdHome, label: "ホーム" }
                IconLink { to: Route::users_search(QueryState::new()), icon: MdSearch, label: "ユーザー検索" }
            }

            div {
                id: "x-page-container",
                style: "flex-grow:1; min-height: 100px;",
                GlobalErrorBoundary {
                    boundary_name: "Navbar".to_string(),
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn IconLink<T: IconShape + Clone + PartialEq + 'static>(to: Route, icon: T, label: String) -> Element {
    rsx! {
        Link {
            to: to,
            span {
                style: "display:flex; align-items:center; gap: 6px; color:white; font-size: 15px;",
                Icon { icon: icon, style: "width: 24px; height: 24px;" }
                "{label}"
            }
        }
    }
}
