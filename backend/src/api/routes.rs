//! Same-origin HTTP endpoints that forward to the upstream users API.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use common::{
    fetch_error::FetchError,
    query_state::QueryState,
    search_const::{DEPARTMENT_OPTIONS_PATH, SKILL_OPTIONS_PATH, USERS_PATH},
    users::{FilterCatalogKind, FilterOptionsResponse},
};

use crate::api::users_client::UsersApiClient;

pub fn router(client: Arc<UsersApiClient>) -> Router {
    Router::new()
        .route(USERS_PATH, get(list_users))
        .route(SKILL_OPTIONS_PATH, get(list_skill_options))
        .route(DEPARTMENT_OPTIONS_PATH, get(list_department_options))
        .with_state(client)
}

async fn list_users(State(client): State<Arc<UsersApiClient>>, RawQuery(raw): RawQuery) -> Response {
    let query = QueryState::parse(raw.as_deref().unwrap_or_default());
    match client.search_users(&query).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            tracing::error!("list_users: upstream request failed: {}", e);
            error_response(&e)
        }
    }
}

async fn list_skill_options(State(client): State<Arc<UsersApiClient>>) -> Json<FilterOptionsResponse> {
    Json(FilterOptionsResponse { items: client.filter_options(FilterCatalogKind::Skills).await })
}

async fn list_department_options(State(client): State<Arc<UsersApiClient>>) -> Json<FilterOptionsResponse> {
    Json(FilterOptionsResponse { items: client.filter_options(FilterCatalogKind::Departments).await })
}

fn error_response(error: &FetchError) -> Response {
    let status = match error {
        FetchError::Status { status, .. } => StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
        FetchError::Transport(_) => StatusCode::BAD_GATEWAY,
        FetchError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": error.to_string() }))).into_response()
}
