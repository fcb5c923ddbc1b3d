//! Client API calls for the users search endpoints.

use common::{
    fetch_error::FetchError,
    query_state::QueryState,
    search_coordinator::UsersFetcher,
    users::{FilterCatalogKind, FilterOption, QuerySettings, UserRow},
};
use dioxus::prelude::*;

#[server]
pub async fn search_users(query: String) -> Result<Vec<UserRow>, ServerFnError> {
    let query = QueryState::parse(&query);
    let client = backend::api::users_client::shared_client();
    match client.search_users(&query).await {
        Ok(response) => Ok(response.users),
        Err(e) => {
            let code = match &e {
                FetchError::Status { status, .. } => *status,
                FetchError::Transport(_) => 502,
                FetchError::Decode(_) => 500,
            };
            Err(ServerFnError::ServerError { message: e.to_string(), code, details: None })
        }
    }
}

/// Never fails on upstream errors; an unavailable catalog is an empty one.
#[server]
pub async fn list_filter_options(kind: FilterCatalogKind) -> Result<Vec<FilterOption>, ServerFnError> {
    Ok(backend::api::users_client::shared_client().filter_options(kind).await)
}

#[server]
pub async fn query_settings() -> Result<QuerySettings, ServerFnError> {
    Ok(backend::config::current().query_settings())
}

/// Runs searches through the `search_users` server function.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerUsersFetcher;

impl UsersFetcher for ServerUsersFetcher {
    async fn fetch_users(&self, query: &QueryState) -> Result<Vec<UserRow>, FetchError> {
        search_users(query.to_string()).await.map_err(|e| match e {
            ServerFnError::ServerError { message, code, .. } => FetchError::Status { status: code, body: message },
            other => FetchError::Transport(other.to_string()),
        })
    }
}
