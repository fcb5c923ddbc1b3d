//! HTTP client for the upstream users API, with a server-side response cache.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, RwLock};

use common::{
    fetch_error::FetchError,
    query_state::QueryState,
    search_const::USERS_PATH,
    search_coordinator::UsersFetcher,
    ttl_cache::{Clock, SystemClock, TtlCache},
    users::{FilterCatalogKind, FilterOption, FilterOptionsResponse, UserRow, UsersResponse},
};
use serde::de::DeserializeOwned;

use crate::config::{self, AppConfig};

pub struct UsersApiClient {
    base_url: String,
    http: reqwest::Client,
    // response bodies keyed by the sha256 of the upstream URL
    cache: Mutex<TtlCache<String, String>>,
}

impl UsersApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            cache: Mutex::new(TtlCache::new(config.server_cache_policy())),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn users_url(&self, query: &QueryState) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, USERS_PATH)
        } else {
            format!("{}{}?{}", self.base_url, USERS_PATH, query)
        }
    }

    pub async fn search_users(&self, query: &QueryState) -> Result<UsersResponse, FetchError> {
        self.get_json(&self.users_url(query), true).await
    }

    /// Catalog failures degrade to an empty list.
    pub async fn filter_options(&self, kind: FilterCatalogKind) -> Vec<FilterOption> {
        let url = format!("{}{}", self.base_url, kind.path());
        match self.get_json::<FilterOptionsResponse>(&url, false).await {
            Ok(response) => response.items,
            Err(e) => {
                tracing::warn!("filter_options({}): {}", kind, e);
                Vec::new()
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, use_cache: bool) -> Result<T, FetchError> {
        let url_hash = sha256::digest(url);
        if use_cache {
            let cached = self.cache().get(&url_hash, SystemClock.now_ms()).cloned();
            if let Some(body) = cached {
                if let Ok(response) = serde_json::from_str::<T>(&body) {
                    tracing::debug!("USERS CACHE HIT: {}", url_hash);
                    return Ok(response);
                }
            }
            tracing::debug!("USERS CACHE MISS: {}", url_hash);
        }

        let t0 = std::time::Instant::now();
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| FetchError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body });
        }
        let parsed = serde_json::from_str::<T>(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        tracing::info!("GET {} -> {} ({}ms)", url, status, t0.elapsed().as_millis());

        if use_cache {
            self.cache().put(url_hash, body, SystemClock.now_ms());
        }
        Ok(parsed)
    }

    fn cache(&self) -> MutexGuard<'_, TtlCache<String, String>> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl UsersFetcher for UsersApiClient {
    async fn fetch_users(&self, query: &QueryState) -> Result<Vec<UserRow>, FetchError> {
        Ok(self.search_users(query).await?.users)
    }
}

static SHARED_CLIENT: OnceLock<RwLock<Arc<UsersApiClient>>> = OnceLock::new();

fn shared_slot() -> &'static RwLock<Arc<UsersApiClient>> {
    SHARED_CLIENT.get_or_init(|| RwLock::new(Arc::new(UsersApiClient::new(&config::current()))))
}

/// Process-wide client built from the current configuration.
pub fn shared_client() -> Arc<UsersApiClient> {
    match shared_slot().read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Rebuilds the shared client, dropping its cache. Call after `config::reload`.
pub fn reset_shared_client(config: &AppConfig) -> Arc<UsersApiClient> {
    let client = Arc::new(UsersApiClient::new(config));
    let mut guard = match shared_slot().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = client.clone();
    client
}
