use std::time::Duration;

use blog_api::db::BlogStorage;
use blog_api::service::{TokenService, seed};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &blog_api::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        token_ttl_secs = cfg.token_ttl_secs,
        seed = cfg.seed
    );

    if cfg.api_secret == blog_api::config::Config::default().api_secret {
        warn!("BLOG_API_SECRET is not set; tokens are signed with the built-in default");
    }

    let storage = BlogStorage::connect(&cfg.database_url).await?;
    info!("database connected");

    if cfg.seed {
        seed::load(&storage).await?;
    }

    let tokens = TokenService::new(
        cfg.api_secret.as_bytes(),
        Duration::from_secs(cfg.token_ttl_secs),
    );
    let state = blog_api::BlogState::new(storage, tokens);
    let app = blog_api::blog_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
