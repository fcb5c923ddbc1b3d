use std::sync::{Arc, Mutex};

use backend::{
    api::{routes, users_client::UsersApiClient},
    config::{AppConfig, AppEnv},
    mock_api::{MockServer, RecordedRequest},
};
use common::{
    query_state::QueryState,
    users::{FilterCatalogKind, FilterOption, FilterOptionsResponse, UsersResponse},
};
use pretty_assertions::assert_eq;
use reqwest::Client;
use serde::de::DeserializeOwned;

fn config_for(base_url: &str) -> AppConfig {
    let mut config = AppConfig::defaults_for(AppEnv::Local);
    config.api_base_url = base_url.to_string();
    config
}

fn record_requests(server: &MockServer) -> (Arc<Mutex<Vec<RecordedRequest>>>, backend::mock_api::Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let subscription = server.on_request(move |request| sink.lock().unwrap().push(request.clone()));
    (seen, subscription)
}

async fn spawn_app(client: Arc<UsersApiClient>) -> String {
    let app = routes::router(client);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> T {
    serde_json::from_str(&response.text().await.unwrap()).unwrap()
}

async fn get_json<T: DeserializeOwned>(url: String) -> T {
    decode_body(Client::new().get(url).send().await.unwrap()).await
}

async fn get_users(base_url: &str, query: &str) -> Vec<String> {
    let response: UsersResponse = get_json(format!("{}/api/users?{}", base_url, query)).await;
    response.users.into_iter().map(|user| user.name).collect()
}

#[tokio::test]
async fn catalog_endpoints_list_fixture_options() {
    let server = MockServer::start().await.unwrap();

    let skills: FilterOptionsResponse = get_json(format!("{}/api/filters/skills", server.base_url())).await;
    let departments: FilterOptionsResponse = get_json(format!("{}/api/filters/departments", server.base_url())).await;

    assert_eq!(skills.items.len(), 5);
    assert_eq!(skills.items[0], FilterOption::new("frontend", "フロントエンド"));
    assert_eq!(
        departments.items.iter().map(|item| item.value.as_str()).collect::<Vec<_>>(),
        vec!["sales", "development", "design", "hr"]
    );

    server.stop().await.unwrap();
}

#[tokio::test]
async fn users_endpoint_filters_and_sorts() {
    let server = MockServer::start().await.unwrap();
    let base_url = server.base_url().to_string();

    assert_eq!(get_users(&base_url, "").await, vec!["山田太郎", "鈴木花子", "佐藤次郎"]);
    assert_eq!(get_users(&base_url, "sort=joined-asc").await, vec!["佐藤次郎", "鈴木花子", "山田太郎"]);
    assert_eq!(get_users(&base_url, "skills=frontend&features=leader").await, vec!["鈴木花子"]);
    assert_eq!(get_users(&base_url, "joinedAfter=2022-01-01&sort=joined-asc").await, vec!["鈴木花子", "山田太郎"]);
    assert_eq!(get_users(&base_url, "q=HANAKO").await, vec!["鈴木花子"]);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn legacy_department_key_is_honoured() {
    let server = MockServer::start().await.unwrap();
    let base_url = server.base_url().to_string();

    assert_eq!(get_users(&base_url, "department=sales").await, vec!["佐藤次郎"]);
    assert_eq!(
        get_users(&base_url, "departments=design&department=development").await,
        vec!["山田太郎", "鈴木花子"]
    );

    server.stop().await.unwrap();
}

#[tokio::test]
async fn cancelled_subscription_stops_observing_requests() {
    let server = MockServer::start().await.unwrap();
    let base_url = server.base_url().to_string();
    let (seen, subscription) = record_requests(&server);

    get_users(&base_url, "q=太郎").await;
    subscription.cancel();
    get_users(&base_url, "q=花子").await;

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/api/users");
    assert_eq!(seen[0].query.get("q"), Some("太郎"));
    assert!(server.observers().is_empty());

    server.stop().await.unwrap();
}

#[tokio::test]
async fn unmatched_paths_are_not_observed() {
    let server = MockServer::start().await.unwrap();
    let (seen, _subscription) = record_requests(&server);

    let response = Client::new()
        .get(format!("{}/api/unknown", server.base_url()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert!(seen.lock().unwrap().is_empty());

    server.stop().await.unwrap();
}

#[tokio::test]
async fn start_if_enabled_respects_environment() {
    let staging = AppConfig::defaults_for(AppEnv::Staging);
    assert!(MockServer::start_if_enabled(&staging).await.unwrap().is_none());

    let local = AppConfig::defaults_for(AppEnv::Local);
    let server = MockServer::start_if_enabled(&local).await.unwrap().unwrap();
    assert!(server.base_url().starts_with("http://127.0.0.1:"));
    server.stop().await.unwrap();
}

#[tokio::test]
async fn app_routes_proxy_to_upstream_and_cache_responses() {
    let server = MockServer::start().await.unwrap();
    let (seen, _subscription) = record_requests(&server);
    let client = Arc::new(UsersApiClient::new(&config_for(server.base_url())));
    let app_url = spawn_app(client.clone()).await;

    assert_eq!(get_users(&app_url, "q=%E5%A4%AA%E9%83%8E").await, vec!["山田太郎"]);
    assert_eq!(get_users(&app_url, "q=%E5%A4%AA%E9%83%8E").await, vec!["山田太郎"]);
    assert_eq!(seen.lock().unwrap().len(), 1);

    let skills: FilterOptionsResponse = get_json(format!("{}/api/filters/skills", app_url)).await;
    assert_eq!(skills.items.len(), 5);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn unreachable_upstream_maps_to_bad_gateway() {
    let server = MockServer::start().await.unwrap();
    let base_url = server.base_url().to_string();
    server.stop().await.unwrap();

    let client = Arc::new(UsersApiClient::new(&config_for(&base_url)));
    let app_url = spawn_app(client.clone()).await;

    let response = Client::new()
        .get(format!("{}/api/users?q=a", app_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = decode_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("request failed"));

    assert_eq!(client.filter_options(FilterCatalogKind::Departments).await, Vec::new());
    assert!(client.search_users(&QueryState::parse("q=a")).await.is_err());
}
