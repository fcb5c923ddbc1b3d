//! Application configuration, resolved once per process and reloadable.
//!
//! Each key is layered: explicit override, then process environment, then the
//! compiled default of the selected environment. The environment itself is picked
//! from an explicit choice, then `APP_ENV`, then `local` (`production` in release
//! builds).

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, RwLock},
};

use common::{ttl_cache::CachePolicy, users::QuerySettings};
use config::{ConfigBuilder, ConfigError, Environment, builder::DefaultState};
use serde::{Deserialize, Serialize};

const ENV_APP_ENV: &str = "APP_ENV";
const ENV_API_BASE_URL: &str = "API_BASE_URL";
const ENV_API_MOCK: &str = "API_MOCK";
const ENV_SERVER_CACHE_TTL_MS: &str = "SERVER_CACHE_TTL_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    Local,
    Development,
    Staging,
    Production,
}

impl AppEnv {
    /// Unknown or missing names fall back to `local`.
    pub fn coerce(name: Option<&str>) -> Self {
        match name {
            Some("development") => Self::Development,
            Some("staging") => Self::Staging,
            Some("production") => Self::Production,
            _ => Self::Local,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

/// Compilation profile of the running binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    pub const fn current() -> Self {
        if cfg!(debug_assertions) { Self::Debug } else { Self::Release }
    }

    pub fn is_release(self) -> bool {
        self == Self::Release
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    pub stale_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_env: AppEnv,
    pub api_base_url: String,
    pub api_mock: bool,
    pub server_cache_ttl_ms: u64,
    pub server_cache_max_entries: usize,
    pub query: QueryConfig,
}

/// Values that win over both the environment and the compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub app_env: Option<AppEnv>,
    pub api_base_url: Option<String>,
    pub api_mock: Option<bool>,
    pub server_cache_ttl_ms: Option<u64>,
}

impl AppConfig {
    pub fn defaults_for(app_env: AppEnv) -> Self {
        let (api_base_url, api_mock, server_cache_ttl_ms, server_cache_max_entries, stale_time_ms) = match app_env {
            AppEnv::Local => ("https://example.com", true, 60_000, 128, 30_000),
            AppEnv::Development => ("https://dev.example.com", false, 60_000, 256, 45_000),
            AppEnv::Staging => ("https://staging.example.com", false, 120_000, 256, 30_000),
            AppEnv::Production => ("https://api.example.com", false, 300_000, 512, 15_000),
        };
        Self {
            app_env,
            api_base_url: api_base_url.to_string(),
            api_mock,
            server_cache_ttl_ms,
            server_cache_max_entries,
            query: QueryConfig { stale_time_ms },
        }
    }

    pub fn resolve(
        overrides: &ConfigOverrides,
        env: &HashMap<String, String>,
        profile: BuildProfile,
    ) -> Result<Self, ConfigError> {
        let app_env = overrides.app_env.unwrap_or_else(|| {
            match AppEnv::coerce(env.get(ENV_APP_ENV).map(String::as_str)) {
                AppEnv::Local if profile.is_release() => AppEnv::Production,
                named => named,
            }
        });
        let defaults = Self::defaults_for(app_env);

        let builder = ConfigBuilder::<DefaultState>::default()
            .set_default("app_env", app_env.as_str())?
            .set_default("api_base_url", defaults.api_base_url.as_str())?
            .set_default("api_mock", defaults.api_mock)?
            .set_default("server_cache_ttl_ms", defaults.server_cache_ttl_ms as i64)?
            .set_default("server_cache_max_entries", defaults.server_cache_max_entries as i64)?
            .set_default("query.stale_time_ms", defaults.query.stale_time_ms as i64)?
            .add_source(Environment::default().source(Some(environment_layer(env))).try_parsing(true))
            .set_override_option("api_base_url", overrides.api_base_url.clone())?
            .set_override_option("api_mock", overrides.api_mock)?
            .set_override_option("server_cache_ttl_ms", overrides.server_cache_ttl_ms.map(|ms| ms as i64))?;

        builder.build()?.try_deserialize()
    }

    pub fn resolve_from_process(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, &std::env::vars().collect(), BuildProfile::current())
    }

    pub fn server_cache_policy(&self) -> CachePolicy {
        CachePolicy { ttl_ms: self.server_cache_ttl_ms, max_entries: self.server_cache_max_entries }
    }

    pub fn query_settings(&self) -> QuerySettings {
        QuerySettings {
            stale_time_ms: self.query.stale_time_ms,
            max_entries: self.server_cache_max_entries,
        }
    }
}

/// Environment variables that may replace a default. Values that do not parse
/// as the key's type are left out so the default stays in place.
fn environment_layer(env: &HashMap<String, String>) -> config::Map<String, String> {
    let mut layer = config::Map::new();
    if let Some(url) = env.get(ENV_API_BASE_URL).filter(|url| !url.is_empty()) {
        layer.insert(ENV_API_BASE_URL.to_string(), url.clone());
    }
    if let Some(mock) = env.get(ENV_API_MOCK) {
        // only the literal "true" enables mocking
        layer.insert(ENV_API_MOCK.to_string(), (mock == "true").to_string());
    }
    if let Some(ttl) = env.get(ENV_SERVER_CACHE_TTL_MS).filter(|ttl| ttl.parse::<u64>().is_ok()) {
        layer.insert(ENV_SERVER_CACHE_TTL_MS.to_string(), ttl.clone());
    }
    layer
}

static CURRENT: OnceLock<RwLock<Arc<AppConfig>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<AppConfig>> {
    CURRENT.get_or_init(|| {
        let config = AppConfig::resolve_from_process(&ConfigOverrides::default()).unwrap_or_else(|e| {
            tracing::error!("config: falling back to local defaults: {}", e);
            AppConfig::defaults_for(AppEnv::Local)
        });
        RwLock::new(Arc::new(config))
    })
}

/// Read-only snapshot of the process configuration.
pub fn current() -> Arc<AppConfig> {
    match slot().read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Re-resolves the process configuration with `overrides` on top.
pub fn reload(overrides: &ConfigOverrides) -> Result<Arc<AppConfig>, ConfigError> {
    let config = Arc::new(AppConfig::resolve_from_process(overrides)?);
    let mut guard = match slot().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = config.clone();
    tracing::info!("config: reloaded for {} (api_base_url = {})", config.app_env.as_str(), config.api_base_url);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn missing_app_env_resolves_local_defaults() {
        let config = AppConfig::resolve(&ConfigOverrides::default(), &HashMap::new(), BuildProfile::Debug).unwrap();

        assert_eq!(config, AppConfig::defaults_for(AppEnv::Local));
        assert!(config.api_mock);
    }

    #[test]
    fn app_env_selects_compiled_defaults() {
        let config =
            AppConfig::resolve(&ConfigOverrides::default(), &env(&[("APP_ENV", "staging")]), BuildProfile::Debug)
                .unwrap();

        assert_eq!(config.app_env, AppEnv::Staging);
        assert_eq!(config.api_base_url, "https://staging.example.com");
        assert_eq!(config.server_cache_ttl_ms, 120_000);
        assert_eq!(config.query, QueryConfig { stale_time_ms: 30_000 });
    }

    #[test]
    fn release_builds_never_default_to_local() {
        let implicit = AppConfig::resolve(&ConfigOverrides::default(), &HashMap::new(), BuildProfile::Release).unwrap();
        assert_eq!(implicit, AppConfig::defaults_for(AppEnv::Production));

        let named_local =
            AppConfig::resolve(&ConfigOverrides::default(), &env(&[("APP_ENV", "local")]), BuildProfile::Release)
                .unwrap();
        assert_eq!(named_local.app_env, AppEnv::Production);

        let staging =
            AppConfig::resolve(&ConfigOverrides::default(), &env(&[("APP_ENV", "staging")]), BuildProfile::Release)
                .unwrap();
        assert_eq!(staging.app_env, AppEnv::Staging);

        let explicit = ConfigOverrides { app_env: Some(AppEnv::Local), ..ConfigOverrides::default() };
        let config = AppConfig::resolve(&explicit, &HashMap::new(), BuildProfile::Release).unwrap();
        assert_eq!(config, AppConfig::defaults_for(AppEnv::Local));
    }

    #[test]
    fn unknown_app_env_is_local() {
        assert_eq!(AppEnv::coerce(Some("qa")), AppEnv::Local);
        assert_eq!(AppEnv::coerce(None), AppEnv::Local);
    }

    #[test]
    fn environment_variables_replace_defaults() {
        let config = AppConfig::resolve(
            &ConfigOverrides::default(),
            &env(&[
                ("APP_ENV", "production"),
                ("API_BASE_URL", "http://127.0.0.1:9000"),
                ("API_MOCK", "true"),
                ("SERVER_CACHE_TTL_MS", "5000"),
            ]),
            BuildProfile::Debug,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert!(config.api_mock);
        assert_eq!(config.server_cache_ttl_ms, 5_000);
        assert_eq!(config.server_cache_max_entries, 512);
    }

    #[test]
    fn unparsable_environment_values_keep_defaults() {
        let config = AppConfig::resolve(
            &ConfigOverrides::default(),
            &env(&[("SERVER_CACHE_TTL_MS", "soon"), ("API_MOCK", "yes")]),
            BuildProfile::Debug,
        )
        .unwrap();

        assert_eq!(config.server_cache_ttl_ms, 60_000);
        assert!(!config.api_mock);
    }

    #[test]
    fn explicit_overrides_beat_environment() {
        let overrides = ConfigOverrides {
            app_env: Some(AppEnv::Development),
            api_base_url: Some("http://127.0.0.1:4010".to_string()),
            api_mock: None,
            server_cache_ttl_ms: Some(10),
        };
        let config = AppConfig::resolve(
            &overrides,
            &env(&[("APP_ENV", "production"), ("API_BASE_URL", "http://ignored"), ("SERVER_CACHE_TTL_MS", "99")]),
            BuildProfile::Debug,
        )
        .unwrap();

        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.api_base_url, "http://127.0.0.1:4010");
        assert_eq!(config.server_cache_ttl_ms, 10);
        assert_eq!(config.server_cache_max_entries, 256);
    }

    #[test]
    fn query_settings_follow_environment() {
        let settings = AppConfig::defaults_for(AppEnv::Development).query_settings();

        assert_eq!(settings, QuerySettings { stale_time_ms: 45_000, max_entries: 256 });
        assert_eq!(settings.cache_policy(), CachePolicy { ttl_ms: 45_000, max_entries: 256 });
    }
}
