//! Frontend application entry point.

use frontend::app::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use axum::{extract::Request, middleware::Next};
        use dioxus::server::axum;

        upstream::bootstrap().await?;

        Ok(dioxus::server::router(App)
            .merge(backend::api::routes::router(backend::api::users_client::shared_client()))
            .layer(axum::middleware::from_fn(
                |request: Request, next: Next| async move {
                    let path = request.uri().path().to_string();
                    let res = next.run(request).await;
                    dioxus::logger::tracing::debug!("{} -> {}", path, res.status());
                    res
                },
            )))
    });
}

#[cfg(feature = "server")]
mod upstream {
    use backend::{
        api::users_client::reset_shared_client,
        config::{self, ConfigOverrides},
        mock_api::MockServer,
    };
    use tokio::sync::OnceCell;

    // lives for the whole process; the serve closure may run more than once
    static MOCK_SERVER: OnceCell<Option<MockServer>> = OnceCell::const_new();

    /// Points the upstream client at a local mock when the environment asks for one.
    pub async fn bootstrap() -> anyhow::Result<()> {
        MOCK_SERVER
            .get_or_try_init(|| async {
                let server = MockServer::start_if_enabled(&config::current()).await?;
                if let Some(server) = &server {
                    let overrides = ConfigOverrides {
                        api_base_url: Some(server.base_url().to_string()),
                        ..Default::default()
                    };
                    let config = config::reload(&overrides)?;
                    reset_shared_client(&config);
                }
                anyhow::Ok(server)
            })
            .await?;
        Ok(())
    }
}
