//! Tweet Sentiment Pipeline — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tweet_sentiment_analyzer::api;
use tweet_sentiment_analyzer::config::PipelineConfig;
use tweet_sentiment_analyzer::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = PipelineConfig::load()?;
    let metrics = Metrics::init(config.cache.capacity);

    let router = api::create_router(&config).merge(metrics.router());

    let addr = config.server.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "pipeline API listening");
    axum::serve(listener, router).await?;
    Ok(())
}
