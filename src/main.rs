use anyhow::Context;
use clap::Parser;
use fruits::config::Config;
use fruits::http::{build_app, AppState};
use fruits::lifecycle::{setup_tracing, FruitSystem};
use fruits::views::Views;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    setup_tracing();

    let system = FruitSystem::start(config.database_url.clone(), config.channel_capacity)
        .await
        .context("failed to open record store")?;
    let views = Views::new().context("failed to load templates")?;
    let state = AppState::new(system.fruits.clone(), views, config.error_status);
    let app = build_app(state, &config.public_dir);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, error_status = ?config.error_status, "Listening");

    axum::serve(
        listener,
        axum::ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server failed")?;

    info!("Server stopped");
    system.shutdown().await.context("record store did not stop cleanly")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = wait_for_signal().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signals");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn wait_for_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
        Ok(())
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}
