use std::sync::{Arc, Mutex};

use backend::{
    api::users_client::UsersApiClient,
    config::{AppConfig, AppEnv},
    mock_api::MockServer,
};
use common::{
    fetch_error::FetchError,
    filter_codec::FilterCodec,
    filter_criteria::toggle,
    query_state::QueryState,
    search_const::{DEPARTMENTS_KEY, FEATURES_KEY, SKILLS_KEY},
    search_coordinator::{ResultsPane, SearchCoordinator, UsersFetcher},
    ttl_cache::ManualClock,
    users::UserRow,
};
use pretty_assertions::assert_eq;

fn coordinator(clock: ManualClock) -> SearchCoordinator<ManualClock> {
    let settings = AppConfig::defaults_for(AppEnv::Local).query_settings();
    SearchCoordinator::new(FilterCodec::users(), settings.cache_policy(), clock)
}

fn client_for(server: &MockServer) -> UsersApiClient {
    let mut config = AppConfig::defaults_for(AppEnv::Local);
    config.api_base_url = server.base_url().to_string();
    UsersApiClient::new(&config)
}

fn names(pane: &ResultsPane) -> Vec<&str> {
    pane.rows().iter().map(|row| row.name.as_str()).collect()
}

#[tokio::test]
async fn keyword_search_commits_url_and_renders_single_row() {
    let server = MockServer::start().await.unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let _subscription = server.on_request(move |request| sink.lock().unwrap().push(request.clone()));
    let client = client_for(&server);
    let mut coordinator = coordinator(ManualClock::new(0));

    assert!(coordinator.initialize(&QueryState::new()).is_none());
    assert_eq!(coordinator.pane(), &ResultsPane::AwaitingInput);

    coordinator.draft_mut().set_keyword("太郎");
    let committed = coordinator.submit();
    assert_eq!(committed.to_string(), "q=%E5%A4%AA%E9%83%8E");
    assert_eq!(committed.get("q"), Some("太郎"));

    let ticket = coordinator.initialize(&committed).unwrap();
    assert!(coordinator.pane().is_loading());
    let result = ticket.run(&client).await;
    assert!(coordinator.complete(&ticket, result));

    assert_eq!(names(coordinator.pane()), vec!["山田太郎"]);
    assert_eq!(coordinator.pane().message(), None);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/api/users");
    assert_eq!(seen[0].query, QueryState::parse("q=太郎"));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn repeated_keys_are_committed_and_feature_toggles_cancel_out() {
    let server = MockServer::start().await.unwrap();
    let client = client_for(&server);
    let mut coordinator = coordinator(ManualClock::new(0));
    coordinator.initialize(&QueryState::new());

    let draft = coordinator.draft_mut();
    draft.toggle_value(SKILLS_KEY, "frontend");
    draft.toggle_value(DEPARTMENTS_KEY, "development");
    draft.toggle_value(DEPARTMENTS_KEY, "design");
    let before = draft.values(FEATURES_KEY).to_vec();
    draft.toggle_value(FEATURES_KEY, "remote");
    draft.toggle_value(FEATURES_KEY, "remote");
    assert_eq!(draft.values(FEATURES_KEY), before.as_slice());
    assert_eq!(toggle(&toggle(&before, "mentor"), "mentor"), before);

    let committed = coordinator.submit();
    assert_eq!(committed.to_string(), "skills=frontend&departments=development&departments=design");

    let ticket = coordinator.initialize(&committed).unwrap();
    let result = ticket.run(&client).await;
    coordinator.complete(&ticket, result);

    assert_eq!(names(coordinator.pane()), vec!["山田太郎", "鈴木花子"]);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn older_response_never_overwrites_newer_one() {
    let server = MockServer::start().await.unwrap();
    let client = client_for(&server);
    let mut coordinator = coordinator(ManualClock::new(0));

    let first = coordinator.initialize(&QueryState::parse("q=花子")).unwrap();
    let second = coordinator.initialize(&QueryState::parse("q=次郎")).unwrap();
    assert!(first.sequence < second.sequence);

    let (first_result, second_result) = tokio::join!(first.run(&client), second.run(&client));
    assert!(coordinator.complete(&second, second_result));
    assert!(!coordinator.complete(&first, first_result));

    assert_eq!(names(coordinator.pane()), vec!["佐藤次郎"]);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn no_match_renders_empty_results_message() {
    let server = MockServer::start().await.unwrap();
    let client = client_for(&server);
    let mut coordinator = coordinator(ManualClock::new(0));

    let ticket = coordinator.initialize(&QueryState::parse("q=nobody&features=newgrad")).unwrap();
    let result = ticket.run(&client).await;
    coordinator.complete(&ticket, result);

    assert_eq!(coordinator.pane(), &ResultsPane::Success(Vec::new()));
    assert_eq!(
        coordinator.pane().message(),
        Some("条件に一致するユーザーが見つかりませんでした。")
    );

    server.stop().await.unwrap();
}

#[tokio::test]
async fn failed_search_can_be_retried_once_upstream_recovers() {
    struct Flaky {
        upstream: UsersApiClient,
        fail: Mutex<bool>,
    }

    impl UsersFetcher for Flaky {
        async fn fetch_users(&self, query: &QueryState) -> Result<Vec<UserRow>, FetchError> {
            if *self.fail.lock().unwrap() {
                return Err(FetchError::Status { status: 503, body: "unavailable".to_string() });
            }
            self.upstream.fetch_users(query).await
        }
    }

    let server = MockServer::start().await.unwrap();
    let fetcher = Flaky { upstream: client_for(&server), fail: Mutex::new(true) };
    let mut coordinator = coordinator(ManualClock::new(0));

    let ticket = coordinator.initialize(&QueryState::parse("skills=qa")).unwrap();
    let result = ticket.run(&fetcher).await;
    coordinator.complete(&ticket, result);
    assert!(matches!(coordinator.pane(), ResultsPane::Error { retry_eligible: true, .. }));

    *fetcher.fail.lock().unwrap() = false;
    let retry = coordinator.retry().unwrap();
    let result = retry.run(&fetcher).await;
    coordinator.complete(&retry, result);

    assert_eq!(names(coordinator.pane()), vec!["佐藤次郎"]);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn fresh_results_are_reused_without_refetching() {
    let server = MockServer::start().await.unwrap();
    let seen = Arc::new(Mutex::new(0usize));
    let counter = seen.clone();
    let _subscription = server.on_request(move |_| *counter.lock().unwrap() += 1);
    let client = client_for(&server);
    let clock = ManualClock::new(0);
    let mut coordinator = coordinator(clock.clone());

    let ticket = coordinator.initialize(&QueryState::parse("skills=frontend&skills=qa")).unwrap();
    let result = ticket.run(&client).await;
    coordinator.complete(&ticket, result);
    coordinator.initialize(&QueryState::new());

    clock.advance(1_000);
    assert!(coordinator.initialize(&QueryState::parse("skills=qa&skills=frontend")).is_none());
    assert_eq!(coordinator.pane(), &ResultsPane::Success(Vec::new()));
    assert_eq!(*seen.lock().unwrap(), 1);

    server.stop().await.unwrap();
}
