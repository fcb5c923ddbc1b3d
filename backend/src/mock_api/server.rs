//! In-process mock of the upstream users API.

use std::{
    collections::BTreeMap,
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard, Weak},
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{RawQuery, Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use common::{
    filter_codec::FilterCodec,
    query_state::QueryState,
    search_const::{DEPARTMENT_OPTIONS_PATH, SKILL_OPTIONS_PATH, USERS_PATH},
    users::FilterOptionsResponse,
};
use tokio::{sync::oneshot, task::JoinHandle};

use crate::{
    config::{AppConfig, AppEnv, BuildProfile},
    mock_api::{
        fixtures::{USERS_FIXTURE, department_options, skill_options},
        users_filter::filter_users,
    },
};

/// Mocking only ever applies to local development, and never to release builds.
pub fn should_use_mock(config: &AppConfig, profile: BuildProfile) -> bool {
    config.api_mock && config.app_env == AppEnv::Local && !profile.is_release()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub query: QueryState,
}

type Listener = Arc<dyn Fn(&RecordedRequest) + Send + Sync>;

#[derive(Default)]
struct ListenerSlots {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Listeners notified of every request that matched a mock route.
#[derive(Clone, Default)]
pub struct RequestObservers {
    slots: Arc<Mutex<ListenerSlots>>,
}

impl RequestObservers {
    pub fn subscribe(&self, listener: impl Fn(&RecordedRequest) + Send + Sync + 'static) -> Subscription {
        let mut slots = lock(&self.slots);
        let id = slots.next_id;
        slots.next_id += 1;
        slots.listeners.insert(id, Arc::new(listener));
        Subscription { id, slots: Arc::downgrade(&self.slots) }
    }

    pub fn len(&self) -> usize {
        lock(&self.slots).listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn notify(&self, request: &RecordedRequest) {
        let listeners = lock(&self.slots).listeners.values().cloned().collect::<Vec<_>>();
        for listener in listeners {
            listener(request);
        }
    }
}

/// Removes its listener when cancelled or dropped.
#[must_use = "dropping a subscription cancels it"]
pub struct Subscription {
    id: u64,
    slots: Weak<Mutex<ListenerSlots>>,
}

impl Subscription {
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            lock(&slots).listeners.remove(&self.id);
        }
    }
}

fn lock(slots: &Mutex<ListenerSlots>) -> MutexGuard<'_, ListenerSlots> {
    match slots.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

pub fn router(observers: RequestObservers) -> Router {
    Router::new()
        .route(USERS_PATH, get(list_users))
        .route(SKILL_OPTIONS_PATH, get(list_skill_options))
        .route(DEPARTMENT_OPTIONS_PATH, get(list_department_options))
        .route_layer(middleware::from_fn_with_state(observers, record_request))
}

async fn record_request(State(observers): State<RequestObservers>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        path: request.uri().path().to_string(),
        query: QueryState::parse(request.uri().query().unwrap_or_default()),
    };
    tracing::debug!("mock api: {} {}?{}", request.method(), recorded.path, recorded.query);
    observers.notify(&recorded);
    next.run(request).await
}

async fn list_users(RawQuery(raw): RawQuery) -> Json<serde_json::Value> {
    let criteria = FilterCodec::users().decode(&QueryState::parse(raw.as_deref().unwrap_or_default()));
    let users = filter_users(USERS_FIXTURE, &criteria);
    Json(serde_json::json!({ "users": users }))
}

async fn list_skill_options() -> Json<FilterOptionsResponse> {
    Json(FilterOptionsResponse { items: skill_options() })
}

async fn list_department_options() -> Json<FilterOptionsResponse> {
    Json(FilterOptionsResponse { items: department_options() })
}

/// Running mock API bound to an ephemeral local port.
pub struct MockServer {
    addr: SocketAddr,
    base_url: String,
    observers: RequestObservers,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl MockServer {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("mock api: failed to bind")?;
        let addr = listener.local_addr().context("mock api: no local address")?;
        let observers = RequestObservers::default();
        let app = router(observers.clone());
        let (shutdown, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                shutdown_rx.await.ok();
            });
            if let Err(e) = serve.await {
                tracing::error!("mock api: server stopped with error: {}", e);
            }
        });

        tracing::info!("mock api: listening on {}", addr);
        Ok(Self {
            addr,
            base_url: format!("http://{}", addr),
            observers,
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }

    pub async fn start_if_enabled(config: &AppConfig) -> anyhow::Result<Option<Self>> {
        if !should_use_mock(config, BuildProfile::current()) {
            return Ok(None);
        }
        Ok(Some(Self::start().await?))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn on_request(&self, listener: impl Fn(&RecordedRequest) + Send + Sync + 'static) -> Subscription {
        self.observers.subscribe(listener)
    }

    pub fn observers(&self) -> &RequestObservers {
        &self.observers
    }

    pub async fn stop(mut self) -> anyhow::Result<()> {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
        if let Some(task) = self.task.take() {
            task.await.context("mock api: server task panicked")?;
        }
        tracing::info!("mock api: stopped {}", self.addr);
        Ok(())
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
    }
}
