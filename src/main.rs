use anyhow::Context;
use clap::Parser; // for cli
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use genai_relay::config::Args;
use genai_relay::create_app;
use genai_relay::rate_limit::RateLimiter;
use genai_relay::state::{AppState, GenerationSettings};
use genai_relay::vendor::ZhipuClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // parse cli arguments
    let args = Args::parse();

    let api_key = args.api_key();
    if api_key.is_none() {
        warn!("API_KEY is not set, vendor calls will fail until it is configured");
    }

    let client = ZhipuClient::new(&args.api_base, api_key, args.request_timeout())
        .context("failed to build vendor HTTP client")?;
    let video_limiter = Arc::new(RateLimiter::new(
        args.video_rate_limit,
        args.video_rate_window(),
    ));

    // creating shared state
    let state = Arc::new(AppState::new(
        Arc::new(client),
        video_limiter,
        GenerationSettings::from_args(&args),
        args.templates_dir.clone(),
    ));

    let app = create_app(state);

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "relay listening");
    info!(api_base = %args.api_base, "forwarding to vendor API");
    info!(
        "video rate limit: {} requests per {} seconds",
        args.video_rate_limit, args.video_rate_window
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
