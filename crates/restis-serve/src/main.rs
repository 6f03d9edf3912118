//! Restis - a local REST gateway for Redis-compatible stores.
//!
//! This binary connects to a store and serves its command interface over
//! HTTP, mimicking hosted "Redis over REST" APIs for local development.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use restis_serve::{AppState, Config, RedisStore, app};

/// Local REST gateway for Redis-compatible stores.
#[derive(Parser, Debug)]
#[command(name = "restis", version)]
#[command(
    about = "A local server that mimics hosted Redis REST APIs",
    long_about = "A local server that mimics hosted Redis REST APIs for local testing.\n\n\
                  Connect to any local Redis-compatible store and send commands as JSON \
                  arrays, pipelines, or REST paths such as /SET/key/value."
)]
struct Args {
    /// The API token to accept as authorised.
    #[arg(long, env = "RESTIS_TOKEN", default_value = "upstash")]
    token: String,

    /// Address for the server to listen on.
    #[arg(long, env = "RESTIS_ADDR", default_value = ":8000")]
    addr: String,

    /// Address of the store, as host:port, :port or a redis:// URL.
    #[arg(long, env = "RESTIS_REDIS", default_value = ":6379")]
    redis: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists, before flags read their env fallbacks
    let dotenv = std::env::var("DOTENV_PATH").unwrap_or_else(|_| ".env".to_string());
    let dotenv_loaded = std::path::Path::new(&dotenv).exists();
    if dotenv_loaded {
        dotenvy::from_path(&dotenv)?;
    }

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if dotenv_loaded {
        tracing::info!(path = %dotenv, "loaded environment file");
    }

    // Load configuration
    let config = Config::new(&args.addr, &args.redis, &args.token)?;
    let bind_addr = config.bind_addr.clone();

    // Connect to the store
    let store = RedisStore::connect(&config.redis_url).await?;

    // Create application state
    let state = AppState::new(config, Arc::new(store));

    // Build router with middleware
    let app = app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting server");

    axum::serve(listener, app).await?;

    Ok(())
}
