use magicstream::infrastructure::cleanup::spawn_token_cleanup;
use magicstream::infrastructure::config::AppConfig;
use magicstream::infrastructure::db::{self, DbPool, PoolSettings};
use magicstream::infrastructure::state::AppState;
use magicstream::presentation;

use dotenvy::dotenv;
use std::env;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_with_signal().await
}

async fn run_with_signal() -> anyhow::Result<()> {
    run(async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("shutdown signal received");
    })
    .await
}

async fn run<F>(shutdown_signal: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();

    // Tests may call this more than once
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "magicstream=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    let config = AppConfig::from_env()?;
    let (listener, app, state) = bootstrap(config).await?;

    let cleanup = match state.config.token_cleanup_interval_secs {
        0 => None,
        secs => Some(spawn_token_cleanup(
            state.token_service.clone(),
            Duration::from_secs(secs),
        )),
    };

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    if let Some(handle) = cleanup {
        handle.abort();
    }
    state.pool.close().await;
    tracing::info!("server stopped");

    Ok(())
}

async fn bootstrap(
    config: AppConfig,
) -> anyhow::Result<(tokio::net::TcpListener, axum::Router, AppState)> {
    let pool: DbPool = db::create_pool(&config.database_url, PoolSettings::from_env()).await?;

    sqlx::migrate!().run(&pool).await?;

    let port = config.port;
    let state = AppState::new(pool, config)?;
    let app = presentation::router::app(state.clone())?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    Ok((listener, app, state))
}
