use std::net::SocketAddr;
use tokio::fs;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use training_plan::{
    router, spawn_initial_load, AppConfig, AppState, Clock, FileStorage, ReadinessClient,
    ReadinessProxy, TrainingTracker,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    if config.oura.token.is_none() {
        warn!("OURA_TOKEN is not set; readiness requests will fail");
    }

    if let Some(parent) = config.log_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let tracker = TrainingTracker::mount(FileStorage::new(&config.log_path)).await;
    let state = AppState::new(tracker, ReadinessProxy::new(config.oura.clone(), Clock::System));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");

    let readiness = spawn_initial_load(
        state.tracker.clone(),
        ReadinessClient::new(config.readiness_url.clone()),
    )
    .await;

    axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.tracker.lock().await.dispose();
    drop(readiness);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
