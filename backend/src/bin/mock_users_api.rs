//! Standalone mock users API for local development.

use anyhow::Context;
use backend::mock_api::{RequestObservers, router};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mock-users-api", about = "Mock of the upstream users API")]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8787")]
    addr: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("backend=debug,info")))
        .init();

    let args = Args::parse();
    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("failed to bind {}", args.addr))?;
    tracing::info!("mock users api listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(RequestObservers::default()))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;
    Ok(())
}
