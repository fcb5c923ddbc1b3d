//! Filter form and results pane of the users search page.

use common::{query_state::QueryState, search_coordinator::SearchCoordinator, users::FilterOption};
use dioxus::prelude::*;

use crate::data_definitions::browser_clock::BrowserClock;

pub mod filter_form;
pub mod results_table;

/// Shared by every widget under the users search page.
#[derive(Clone, Copy)]
pub struct UsersSearchContext {
    pub coordinator: Signal<SearchCoordinator<BrowserClock>>,
    pub committed_query: ReadSignal<QueryState>,
    pub submit: Callback<()>,
    pub retry: Callback<()>,
    pub skill_options: Memo<Vec<FilterOption>>,
    pub department_options: Memo<Vec<FilterOption>>,
}
