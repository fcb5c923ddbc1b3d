use common::{
    filter_codec::FilterCodec,
    query_state::QueryState,
    search_coordinator::{FetchTicket, SearchCoordinator},
    users::{FilterCatalogKind, FilterOption, QuerySettings},
};
use dioxus::{logger::tracing, prelude::*};

use crate::{
    api::users_api::{ServerUsersFetcher, list_filter_options, query_settings},
    components::{
        suspend_boundary::SuspendWrapper,
        users_search::{UsersSearchContext, filter_form::UsersFilterForm, results_table::UsersResultsPane},
    },
    data_definitions::browser_clock::BrowserClock,
    routes::Route,
};

/// Users search page. The route's query string is the committed filter state.
#[component]
pub fn UsersSearchPage(query: QueryState) -> Element {
    rsx! {
        Title { "ユーザー検索" }
        UsersSearchRoot { query }
    }
}

fn catalog_items(kind: FilterCatalogKind, loaded: &Option<Result<Vec<FilterOption>, ServerFnError>>) -> Vec<FilterOption> {
    match loaded {
        Some(Ok(items)) => items.clone(),
        Some(Err(e)) => {
            tracing::warn!("{} catalog unavailable: {}", kind, e);
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn run_ticket(mut coordinator: Signal<SearchCoordinator<BrowserClock>>, ticket: FetchTicket) {
    spawn(async move {
        let result = ticket.run(&ServerUsersFetcher).await;
        if !coordinator.write().complete(&ticket, result) {
            tracing::debug!("discarded stale users response #{}", ticket.sequence);
        }
    });
}

#[component]
fn UsersSearchRoot(query: ReadSignal<QueryState>) -> Element {
    let mut coordinator = use_signal(|| {
        SearchCoordinator::new(FilterCodec::users(), QuerySettings::default().cache_policy(), BrowserClock)
    });

    let settings = use_resource(query_settings);
    use_effect(move || {
        if let Some(Ok(settings)) = &*settings.read() {
            coordinator.write().set_cache_policy(settings.cache_policy());
        }
    });

    // the url is the committed state: every change re-seeds the draft and may fetch
    use_effect(move || {
        let committed = query.read().clone();
        let ticket = coordinator.write().initialize(&committed);
        if let Some(ticket) = ticket {
            run_ticket(coordinator, ticket);
        }
    });

    let retry = Callback::new(move |_: ()| {
        let ticket = coordinator.write().retry();
        if let Some(ticket) = ticket {
            run_ticket(coordinator, ticket);
        }
    });
    let submit = Callback::new(move |_: ()| {
        let next = coordinator.peek().submit();
        if next == *query.peek() {
            // an unchanged url does not re-run the effect
            retry(());
            return;
        }
        navigator().replace(Route::users_search(next));
    });

    let skill_catalog = use_resource(move || list_filter_options(FilterCatalogKind::Skills));
    let department_catalog = use_resource(move || list_filter_options(FilterCatalogKind::Departments));
    let skill_options = use_memo(move || catalog_items(FilterCatalogKind::Skills, &skill_catalog.read()));
    let department_options =
        use_memo(move || catalog_items(FilterCatalogKind::Departments, &department_catalog.read()));

    use_context_provider(move || UsersSearchContext {
        coordinator,
        committed_query: query,
        submit,
        retry,
        skill_options,
        department_options,
    });

    rsx! {
        div {
            id: "x-users-search-page-root",
            style: r#"
                height: 100%;
                width: 100%;
                display: flex;
                flex-direction: row;
            "#,
            UsersFilterForm {}
            SuspendWrapper { UsersResultsPane {} }
        }
    }
}
